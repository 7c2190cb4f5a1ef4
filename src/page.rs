use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use crate::client::InterviewApi;
use crate::form::{self, Field, FormState, Level, ValidationErrors};
use crate::models::{InterviewRequest, Slot};
use crate::slots::{group_by_date, DateGroup};

pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Where the page sends the user once an interview has been requested.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that only remembers the last route it was sent to.
#[derive(Default)]
pub struct RouteRecorder {
    route: Mutex<Option<String>>,
}

impl RouteRecorder {
    pub fn take(&self) -> Option<String> {
        self.route.lock().unwrap().take()
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, route: &str) {
        *self.route.lock().unwrap() = Some(route.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required inputs missing; nothing was sent.
    Invalid,
    /// Another submission is still in flight.
    Busy,
    Scheduled,
    Failed,
}

#[derive(Default)]
struct PageState {
    form: FormState,
    availability: Vec<Slot>,
    loading: bool,
    submitting: bool,
    errors: ValidationErrors,
    // Id of the most recently issued availability fetch.
    latest_request: u64,
}

/// Everything needed to draw the page at one instant.
#[derive(Debug, Clone)]
pub struct PageView {
    pub form: FormState,
    pub availability: Vec<Slot>,
    pub loading: bool,
    pub submitting: bool,
    pub errors: ValidationErrors,
    pub can_submit: bool,
}

impl PageView {
    pub fn groups(&self) -> Vec<DateGroup<'_>> {
        group_by_date(&self.availability)
    }

    pub fn has_criteria(&self) -> bool {
        self.form.field.is_some() && self.form.level.is_some()
    }

    pub fn is_selected(&self, slot: &Slot) -> bool {
        self.form
            .selected_slot
            .as_ref()
            .is_some_and(|s| s.id == slot.id)
    }
}

fn booking_request(form: &FormState) -> Option<InterviewRequest> {
    Some(InterviewRequest {
        availability_id: form.selected_slot.as_ref()?.id.clone(),
        field: form.field?,
        level: form.level?,
        title: form.title.clone(),
        notes: form.notes.clone(),
    })
}

struct LoadingGuard<'a> {
    state: &'a Mutex<PageState>,
    request_id: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap();
        // A newer fetch owns the flag now.
        if state.latest_request == self.request_id {
            state.loading = false;
        }
    }
}

struct SubmittingGuard<'a> {
    state: &'a Mutex<PageState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().unwrap().submitting = false;
    }
}

/// The "schedule an interview" page: form state, availability lookup and submission.
///
/// Handlers take `&self`, so several of them may be in flight at once on one
/// task. Availability responses are tagged with a request id and only the
/// latest one is applied.
pub struct SchedulePage {
    state: Mutex<PageState>,
    api: Arc<dyn InterviewApi>,
    navigator: Arc<dyn Navigator>,
}

impl SchedulePage {
    pub fn new(api: Arc<dyn InterviewApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: Mutex::new(PageState::default()),
            api,
            navigator,
        }
    }

    pub async fn set_field(&self, field: Option<Field>) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            let changed = state.form.field != field;
            state.form.field = field;
            changed
        };
        if changed {
            self.refresh_availability().await;
        }
    }

    pub async fn set_level(&self, level: Option<Level>) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            let changed = state.form.level != level;
            state.form.level = level;
            changed
        };
        if changed {
            self.refresh_availability().await;
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().unwrap().form.title = title.into();
    }

    pub fn set_notes(&self, notes: impl Into<String>) {
        self.state.lock().unwrap().form.notes = notes.into();
    }

    pub fn select_slot(&self, slot: Slot) {
        self.state.lock().unwrap().form.selected_slot = Some(slot);
    }

    /// Select a slot from the current availability list. Returns `false` if
    /// no listed slot has this id; the previous selection is kept then.
    pub fn select_slot_by_id(&self, id: &str) -> bool {
        let slot = self
            .state
            .lock()
            .unwrap()
            .availability
            .iter()
            .find(|s| s.id == id)
            .cloned();
        match slot {
            Some(slot) => {
                self.select_slot(slot);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> PageView {
        let state = self.state.lock().unwrap();
        PageView {
            form: state.form.clone(),
            availability: state.availability.clone(),
            loading: state.loading,
            submitting: state.submitting,
            errors: state.errors.clone(),
            can_submit: form::can_submit(&state.form, state.submitting),
        }
    }

    async fn refresh_availability(&self) {
        let (field, level, request_id) = {
            let mut state = self.state.lock().unwrap();
            state.latest_request += 1;
            match (state.form.field, state.form.level) {
                (Some(field), Some(level)) => {
                    state.loading = true;
                    (field, level, state.latest_request)
                }
                _ => {
                    state.availability.clear();
                    state.loading = false;
                    return;
                }
            }
        };

        let _loading = LoadingGuard {
            state: &self.state,
            request_id,
        };
        let result = self.api.availability(field, level).await;

        let mut state = self.state.lock().unwrap();
        if state.latest_request != request_id {
            debug!(
                "Discarding availability for {}/{} (request {} superseded by {})",
                field.as_str(),
                level.as_str(),
                request_id,
                state.latest_request
            );
            return;
        }
        match result {
            Ok(slots) => state.availability = slots,
            Err(e) => {
                warn!("Error fetching available slots: {:#}", e);
                state.availability.clear();
            }
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.state.lock().unwrap();
            if state.submitting {
                return SubmitOutcome::Busy;
            }
            let errors = form::validate(&state.form);
            if !errors.is_empty() {
                state.errors = errors;
                return SubmitOutcome::Invalid;
            }
            let Some(request) = booking_request(&state.form) else {
                return SubmitOutcome::Invalid;
            };
            state.errors = ValidationErrors::default();
            state.submitting = true;
            request
        };

        let _submitting = SubmittingGuard { state: &self.state };
        match self.api.schedule_interview(&request).await {
            Ok(()) => {
                info!(
                    "Interview requested for slot {} ({}/{})",
                    request.availability_id,
                    request.field.as_str(),
                    request.level.as_str()
                );
                self.navigator.navigate(DASHBOARD_ROUTE);
                SubmitOutcome::Scheduled
            }
            Err(e) => {
                error!("Scheduling failed: {:#}", e);
                self.state.lock().unwrap().errors = ValidationErrors::form_failure();
                SubmitOutcome::Failed
            }
        }
    }
}
