use std::collections::HashSet;

use anyhow::Context;
use tracing::{info, instrument};

use crate::{
    calendar::ServiceDay,
    schedule::{
        dto::{NewDelivery, NewMenuInstance},
        repo::Schedules,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// No service on Sundays; nothing was written.
    Sunday,
    Processed { deliveries: usize, menu_created: bool },
}

impl ScheduleOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Sunday => "Sunday, no deliveries scheduled.".to_string(),
            Self::Processed { deliveries, .. } => format!("Processed {deliveries} deliveries."),
        }
    }
}

/// Materializes the menu instance and the deliveries for `day`.
///
/// The menu instance is created at most once per date. Deliveries are not
/// deduplicated: a second run on the same date inserts another set.
#[instrument(skip(store), fields(date = %day.date))]
pub async fn schedule_day<S>(store: &S, day: ServiceDay) -> anyhow::Result<ScheduleOutcome>
where
    S: Schedules + ?Sized,
{
    if day.is_sunday() {
        info!("sunday, skipping");
        return Ok(ScheduleOutcome::Sunday);
    }

    let menu_created = ensure_menu_instance(store, day).await?;

    let active = store.active_subscription_ids().await?;
    let paused: HashSet<i64> = store
        .paused_subscription_ids(day.date)
        .await?
        .into_iter()
        .collect();

    let deliveries: Vec<NewDelivery> = active
        .into_iter()
        .filter(|id| !paused.contains(id))
        .map(|id| NewDelivery::scheduled(id, day.date))
        .collect();

    if !deliveries.is_empty() {
        store
            .insert_deliveries(&deliveries)
            .await
            .context("Failed to insert deliveries")?;
    }

    info!(
        deliveries = deliveries.len(),
        paused = paused.len(),
        menu_created,
        "schedule processed"
    );
    Ok(ScheduleOutcome::Processed {
        deliveries: deliveries.len(),
        menu_created,
    })
}

async fn ensure_menu_instance<S>(store: &S, day: ServiceDay) -> anyhow::Result<bool>
where
    S: Schedules + ?Sized,
{
    if store.menu_instance_exists(day.date).await? {
        return Ok(false);
    }

    let week_no = day.menu_week();
    let dow = day.iso_weekday;
    let template = store
        .find_template(week_no.into(), dow.into())
        .await?
        .with_context(|| format!("Failed to find menu template for week {week_no}, DOW {dow}"))?;

    let created = store
        .insert_menu_instance(&NewMenuInstance {
            date: day.date,
            week_no: week_no.into(),
            recipe_id: template.recipe_id,
            meal_slot: template.meal_slot,
        })
        .await
        .context("Failed to insert menu instance")?;
    if created {
        info!(week_no, dow, recipe_id = template.recipe_id, "menu instance created");
    }
    Ok(created)
}
