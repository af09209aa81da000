use super::*;
use chrono::TimeZone;

fn filled_form() -> CreateBlogForm {
    CreateBlogForm {
        title: "B".to_string(),
        category: String::new(),
        description: "y".to_string(),
        cover_image: "x".to_string(),
        content: "z".to_string(),
    }
}

#[test]
fn checkbox_toggles_keep_only_checked_labels() {
    let mut form = filled_form();
    form.toggle_category("FINANCE", true);
    form.toggle_category("TECH", true);
    form.toggle_category("FINANCE", false);

    assert_eq!(form.category, "TECH");
    assert!(form.is_checked("TECH"));
    assert!(!form.is_checked("FINANCE"));

    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let input = form.submit(now).expect("submit");
    assert_eq!(input.category, vec!["TECH"]);
}

#[test]
fn checking_twice_does_not_duplicate() {
    let mut form = filled_form();
    form.toggle_category("CAREER", true);
    form.toggle_category("CAREER", true);
    assert_eq!(form.categories(), vec!["CAREER"]);
}

#[test]
fn free_form_text_is_trimmed_and_deduplicated() {
    let mut form = filled_form();
    form.set_category_text(" Tech , AI,, Tech ,  ");
    assert_eq!(form.categories(), vec!["Tech", "AI"]);
}

#[test]
fn category_input_line_accepts_toggles_or_text() {
    let mut form = filled_form();
    form.apply_category_input("+finance +tech");
    assert_eq!(form.categories(), vec!["FINANCE", "TECH"]);

    form.apply_category_input("-finance");
    assert_eq!(form.categories(), vec!["TECH"]);

    form.apply_category_input("CAREER, LIFESTYLE");
    assert_eq!(form.categories(), vec!["CAREER", "LIFESTYLE"]);
}

#[test]
fn submit_stamps_iso_date_with_millis() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 34, 56)
        .unwrap()
        + chrono::Duration::milliseconds(789);
    let mut form = filled_form();
    form.set_category_text("FINANCE, CAREER");

    let input = form.submit(now).expect("submit");
    assert_eq!(input.date, "2025-06-01T12:34:56.789Z");
    assert_eq!(input.title, "B");
    assert_eq!(input.category, vec!["FINANCE", "CAREER"]);
    assert_eq!(input.cover_image, "x");
    assert_eq!(input.description, "y");
    assert_eq!(input.content, "z");
}

#[test]
fn blank_required_field_is_rejected() {
    let mut form = filled_form();
    form.content = "   ".to_string();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    assert_eq!(
        form.submit(now),
        Err(FormError::MissingField("content"))
    );
}

#[test]
fn reset_clears_every_field() {
    let mut form = filled_form();
    form.toggle_category("TECH", true);
    form.reset();
    assert_eq!(form, CreateBlogForm::default());
}
