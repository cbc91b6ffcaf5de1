//! Closed enumerations that cross the wire as integer codes.

/// Define an enum whose variants serialize as fixed `i32` codes.
///
/// Unknown codes are rejected through `TryFrom<i32>` with
/// [`CoreError::Validation`](crate::error::CoreError::Validation), so serde
/// refuses them at the boundary instead of casting.
macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the wire code.
            pub fn code(self) -> i32 {
                self as i32
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $( $val => Ok(Self::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Unknown {} code: {other}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}
