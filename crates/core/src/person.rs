//! Person classification.

define_code_enum! {
    /// Role a person plays in film production.
    PersonKind {
        #[default]
        Actor = 0,
        Director = 1,
        Producer = 2,
        Screenwriter = 3,
        Composer = 4,
        Operator = 5,
    }
}
