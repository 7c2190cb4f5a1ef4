use leptos::prelude::*;

use crate::form::{ErrorKey, Field, Level};
use crate::models::Slot;
use crate::page::PageView;
use crate::slots::DateGroup;

const STYLE: &str = include_str!("style.css");
// Every input change reloads the page with the full form state.
const AUTO_SUBMIT: &str = "this.form.submit()";

pub(super) fn render_page(page: &PageView) -> String {
    let title = page.form.title.clone();
    let notes = page.form.notes.clone();
    let title_class = input_class(page, ErrorKey::Title);
    let field_class = input_class(page, ErrorKey::Field);
    let title_error = render_error(page, ErrorKey::Title);
    let field_error = render_error(page, ErrorKey::Field);
    let level_error = render_error(page, ErrorKey::Level);
    let slot_error = render_error(page, ErrorKey::Slot);
    let form_error = render_form_error(page);
    let field_options = render_field_options(page.form.field);
    let level_options = render_level_options(page.form.level);
    let slots_html = render_slots(page);
    let disabled = !page.can_submit;
    // Only seen by hosts that render while a booking is in flight.
    let button_label = if page.submitting {
        "Scheduling..."
    } else {
        "Schedule Interview"
    };

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Schedule an Interview"</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <main>
                    <h1>"Schedule an Interview"</h1>
                    <section class="card">
                        <header>
                            <h2>"Interview Details"</h2>
                            <p class="hint">
                                "Select your preferred field and expertise level to see available time slots."
                            </p>
                        </header>
                        <form method="get" action="/schedule">
                            <div class="group">
                                <label for="title">"Interview Title"</label>
                                <input
                                    type="text"
                                    id="title"
                                    name="title"
                                    class=title_class
                                    value=title
                                    placeholder="e.g. Frontend Developer Interview"
                                    onchange=AUTO_SUBMIT
                                />
                                <div inner_html=title_error />
                            </div>
                            <div class="group">
                                <label for="field">"Field of Interest"</label>
                                <select
                                    id="field"
                                    name="field"
                                    class=field_class
                                    onchange=AUTO_SUBMIT
                                    inner_html=field_options
                                />
                                <div inner_html=field_error />
                            </div>
                            <div class="group">
                                <label>"Expertise Level"</label>
                                <div class="choices" inner_html=level_options />
                                <div inner_html=level_error />
                            </div>
                            <div class="group">
                                <label>"Available Time Slots"</label>
                                <div class="slots" inner_html=slots_html />
                                <div inner_html=slot_error />
                            </div>
                            <div class="group">
                                <label for="notes">"Notes (Optional)"</label>
                                <textarea
                                    id="notes"
                                    name="notes"
                                    rows="3"
                                    placeholder="Any specific topics you'd like to discuss or questions you have"
                                    onchange=AUTO_SUBMIT
                                >
                                    {notes}
                                </textarea>
                            </div>
                            <div inner_html=form_error />
                            <button type="submit" formmethod="post" disabled=disabled>
                                {button_label}
                            </button>
                        </form>
                    </section>
                </main>
            </body>
        </html>
    }
    .to_html()
}

pub(super) fn render_dashboard() -> String {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Dashboard"</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <main>
                    <h1>"Dashboard"</h1>
                    <section class="card">
                        <p>"Your interview request has been sent."</p>
                        <p><a href="/schedule">"Schedule another interview"</a></p>
                    </section>
                </main>
            </body>
        </html>
    }
    .to_html()
}

fn input_class(page: &PageView, key: ErrorKey) -> &'static str {
    if page.errors.get(key).is_some() {
        "invalid"
    } else {
        ""
    }
}

fn render_error(page: &PageView, key: ErrorKey) -> String {
    match page.errors.get(key) {
        Some(msg) => {
            let msg = msg.to_string();
            view! { <p class="error">{msg}</p> }.to_html()
        }
        None => String::new(),
    }
}

fn render_form_error(page: &PageView) -> String {
    match page.errors.get(ErrorKey::Form) {
        Some(msg) => {
            let msg = msg.to_string();
            view! { <div class="form-error">{msg}</div> }.to_html()
        }
        None => String::new(),
    }
}

fn render_field_options(selected: Option<Field>) -> String {
    let none_selected = selected.is_none();
    let placeholder = view! {
        <option value="" selected=none_selected>"Select field"</option>
    }
    .to_html();

    let options: String = Field::ALL
        .iter()
        .map(|&f| {
            let value = f.as_str();
            let label = f.label();
            let is_selected = selected == Some(f);
            view! { <option value=value selected=is_selected>{label}</option> }.to_html()
        })
        .collect();

    placeholder + &options
}

fn render_level_options(selected: Option<Level>) -> String {
    Level::ALL
        .iter()
        .map(|&l| {
            let id = l.as_str();
            let label = l.label();
            let checked = selected == Some(l);
            view! {
                <div class="choice">
                    <input
                        type="radio"
                        id=id
                        name="level"
                        value=id
                        checked=checked
                        onchange=AUTO_SUBMIT
                    />
                    <label for=id>{label}</label>
                </div>
            }
            .to_html()
        })
        .collect()
}

fn render_slots(page: &PageView) -> String {
    // Only seen by hosts that render while a fetch is in flight.
    if page.loading {
        return view! { <p class="empty">"Loading available slots..."</p> }.to_html();
    }
    if !page.has_criteria() {
        return view! {
            <p class="empty">"Select a field and expertise level to see available slots"</p>
        }
        .to_html();
    }

    let groups = page.groups();
    if groups.is_empty() {
        return view! {
            <p class="empty">"No available slots for this field and expertise level"</p>
        }
        .to_html();
    }

    groups.iter().map(|g| render_date_group(page, g)).collect()
}

fn render_date_group(page: &PageView, group: &DateGroup<'_>) -> String {
    let heading = group.heading().to_string();
    let rows_html: String = group
        .slots
        .iter()
        .map(|slot| render_slot_row(slot, page.is_selected(slot)))
        .collect();

    view! {
        <div class="date-group">
            <h3>{heading}</h3>
            <div class="slot-list" inner_html=rows_html />
        </div>
    }
    .to_html()
}

fn render_slot_row(slot: &Slot, selected: bool) -> String {
    let css = if selected { "slot selected" } else { "slot" };
    let input_id = format!("slot-{}", slot.id);
    let label_for = input_id.clone();
    let value = slot.id.clone();
    let time = slot.time_range();
    let interviewer = slot.interviewer_label();

    view! {
        <label class=css for=label_for>
            <span class="slot-text">
                <span class="slot-time">{time}</span>
                <span class="slot-interviewer">{interviewer}</span>
            </span>
            <input
                type="radio"
                id=input_id
                name="slot"
                value=value
                checked=selected
                onchange=AUTO_SUBMIT
            />
        </label>
    }
    .to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, ValidationErrors};
    use crate::test_support::slot;

    fn view_with(availability: Vec<Slot>) -> PageView {
        PageView {
            form: FormState {
                field: Some(Field::Backend),
                level: Some(Level::Mid),
                ..Default::default()
            },
            availability,
            loading: false,
            submitting: false,
            errors: ValidationErrors::default(),
            can_submit: false,
        }
    }

    #[test]
    fn test_slot_rows_grouped_under_date_heading() {
        let page = view_with(vec![slot(
            "s1",
            Some("2024-05-01T00:00:00Z"),
            "10:00",
            "10:30",
            Some("Ana"),
        )]);
        let html = render_slots(&page);
        assert_eq!(html.matches("date-group").count(), 1);
        assert!(html.contains("2024-05-01"));
        assert!(!html.contains("T00:00:00Z"));
        assert!(html.contains("10:00 - 10:30"));
        assert!(html.contains("with Ana"));
    }

    #[test]
    fn test_empty_availability_message() {
        let html = render_slots(&view_with(vec![]));
        assert!(html.contains("No available slots for this field and expertise level"));
        assert!(!html.contains("Select a field and expertise level"));
    }

    #[test]
    fn test_prompt_without_criteria() {
        let mut page = view_with(vec![]);
        page.form.level = None;
        let html = render_slots(&page);
        assert!(html.contains("Select a field and expertise level to see available slots"));
    }

    #[test]
    fn test_loading_message() {
        let mut page = view_with(vec![]);
        page.loading = true;
        assert!(render_slots(&page).contains("Loading available slots..."));
    }

    #[test]
    fn test_selected_row_is_marked() {
        let mut page = view_with(vec![
            slot("s1", Some("2024-05-01"), "10:00", "10:30", None),
            slot("s2", Some("2024-05-01"), "11:00", "11:30", None),
        ]);
        page.form.selected_slot = Some(page.availability[1].clone());
        let html = render_slots(&page);
        assert_eq!(html.matches("slot selected").count(), 1);
        assert!(html.contains("with Unknown Interviewer"));
    }

    #[test]
    fn test_errors_rendered_inline() {
        let mut page = view_with(vec![]);
        page.errors = ValidationErrors::form_failure();
        let html = render_page(&page);
        assert!(html.contains("Failed to schedule interview. Please try again."));
        assert!(html.contains("Schedule Interview"));
    }
}
