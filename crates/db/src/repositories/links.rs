//! Shared bookkeeping for references that span documents.

use crate::models::outcome::{LinkOutcome, Sweep, SweepOutcome};
use crate::store::{Db, Filter, StoreError, Update};

/// One side of a two-sided reference change.
pub(crate) struct Side<'a> {
    pub collection: &'a str,
    pub id: &'a str,
    pub update: Update,
}

/// Write the first side, then the second, without rollback.
///
/// The first side must actually change for the operation to proceed. The
/// second side only has to exist: a reference already present there still
/// leaves the relation consistent. Once the first write has landed, any
/// failure of the second (including cancellation) yields
/// [`LinkOutcome::FirstOnly`] rather than an error so the caller sees the
/// one-sided state.
pub(crate) async fn apply_two_sided(
    db: &Db,
    first: Side<'_>,
    second: Side<'_>,
) -> Result<LinkOutcome, StoreError> {
    let outcome = db
        .update_one(first.collection, first.id, &first.update)
        .await?;
    if !outcome.is_modified() {
        return Ok(LinkOutcome::Failed);
    }

    match db
        .update_one(second.collection, second.id, &second.update)
        .await
    {
        Ok(outcome) if outcome.is_matched() => Ok(LinkOutcome::BothUpdated),
        Ok(_) => {
            tracing::warn!(
                first_collection = first.collection,
                first_id = first.id,
                second_collection = second.collection,
                second_id = second.id,
                "Second side of link missing; relation left one-sided",
            );
            Ok(LinkOutcome::FirstOnly)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                first_collection = first.collection,
                first_id = first.id,
                second_collection = second.collection,
                second_id = second.id,
                "Second side of link failed; relation left one-sided",
            );
            Ok(LinkOutcome::FirstOnly)
        }
    }
}

/// Pull `id` from `field` in every document of `collection` that holds it.
///
/// Store failures become [`SweepOutcome::Failed`] so remaining sweeps still
/// run; cancellation stops the caller.
pub(crate) async fn sweep(
    db: &Db,
    collection: &str,
    field: &'static str,
    id: &str,
) -> Result<Sweep, StoreError> {
    let result = db
        .update_many(collection, &Filter::contains(field, id), &Update::pull(field, id))
        .await;
    let outcome = match result {
        Ok(outcome) if outcome.modified > 0 => SweepOutcome::Cleaned {
            count: outcome.modified,
        },
        Ok(_) => SweepOutcome::NothingToClean,
        Err(StoreError::Cancelled) => return Err(StoreError::Cancelled),
        Err(e) => {
            tracing::warn!(error = %e, collection, field, id, "Reference sweep failed");
            SweepOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };
    tracing::debug!(collection, field, id, outcome = ?outcome, "Reference sweep finished");
    Ok(Sweep {
        collection: collection.to_string(),
        field,
        outcome,
    })
}
