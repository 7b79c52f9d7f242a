use tracing::{error, info};
use uuid::Uuid;

use crate::{
    auth::{repo::Accounts, repo_types::Role},
    error::ApiError,
    pauses::{
        dto::{NewPause, Pause},
        repo::Pauses,
    },
};

/// Owner of the subscription or any admin.
pub fn may_pause(caller: Uuid, owner: Uuid, caller_role: Option<Role>) -> bool {
    caller == owner || caller_role == Some(Role::Admin)
}

/// Records a pause and marks the covered deliveries as skipped.
///
/// The pause row is authoritative: if the delivery update fails afterwards
/// the error is logged and the created pause is still returned.
pub async fn request_pause<S>(store: &S, caller: Uuid, pause: NewPause) -> Result<Pause, ApiError>
where
    S: Accounts + Pauses + ?Sized,
{
    let owner = store
        .subscription_owner(pause.subscription_id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| ApiError::internal("Subscription not found."))?;

    let role = store.profile_role(caller).await.unwrap_or(None);
    if !may_pause(caller, owner, role) {
        info!(%caller, subscription_id = pause.subscription_id, "pause forbidden");
        return Err(ApiError::Forbidden);
    }

    let created = store.insert_pause(&pause).await?;
    info!(
        pause_id = created.id,
        subscription_id = created.subscription_id,
        start = %created.start_date,
        end = %created.end_date,
        "pause created"
    );

    match store
        .skip_deliveries(pause.subscription_id, pause.start_date, pause.end_date)
        .await
    {
        Ok(n) => info!(subscription_id = pause.subscription_id, skipped = n, "deliveries skipped"),
        Err(e) => error!(
            error = %e,
            pause_id = created.id,
            "failed to update deliveries, but pause was created"
        ),
    }

    Ok(created)
}
