use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::client::InterviewApi;
use crate::form::{ErrorKey, Field, Level};
use crate::page::{Navigator, SchedulePage, SubmitOutcome};

/// Reports the post-booking route instead of following it.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        info!("Interview requested; continue at {}", route);
    }
}

fn new_page(api: Arc<dyn InterviewApi>) -> SchedulePage {
    SchedulePage::new(api, Arc::new(TerminalNavigator))
}

/// Print the slots open for a field and level, grouped by date.
pub async fn run_slots(api: Arc<dyn InterviewApi>, field: Field, level: Level) -> Result<()> {
    let page = new_page(api);
    page.set_field(Some(field)).await;
    page.set_level(Some(level)).await;

    let view = page.snapshot();
    let groups = view.groups();
    if groups.is_empty() {
        println!("No available slots for {} / {}", field.label(), level.label());
        return Ok(());
    }

    println!("Available slots for {} / {}:", field.label(), level.label());
    for group in &groups {
        println!("\n{}", group.heading());
        for slot in &group.slots {
            println!(
                "  {}  {}  (ID: {})",
                slot.time_range(),
                slot.interviewer_label(),
                slot.id
            );
        }
    }
    Ok(())
}

pub struct InterviewArgs {
    pub field: Field,
    pub level: Level,
    pub slot: String,
    pub title: String,
    pub notes: String,
}

/// Fill in the page the way a user would and submit it.
pub async fn run_request(api: Arc<dyn InterviewApi>, args: InterviewArgs) -> Result<()> {
    let page = new_page(api);
    page.set_field(Some(args.field)).await;
    page.set_level(Some(args.level)).await;
    page.set_title(args.title);
    page.set_notes(args.notes);

    if !page.select_slot_by_id(&args.slot) {
        info!(
            "Slot {} is not offered for {}/{}",
            args.slot,
            args.field.as_str(),
            args.level.as_str()
        );
    }

    match page.submit().await {
        SubmitOutcome::Scheduled => {
            println!("Interview requested for slot {}", args.slot);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let view = page.snapshot();
            for (key, msg) in view.errors.iter() {
                println!("{}: {}", key.as_str(), msg);
            }
            bail!("Interview request is incomplete")
        }
        SubmitOutcome::Failed => {
            let view = page.snapshot();
            bail!(
                "{}",
                view.errors.get(ErrorKey::Form).unwrap_or("Interview request failed")
            )
        }
        SubmitOutcome::Busy => bail!("A submission is already in progress"),
    }
}
