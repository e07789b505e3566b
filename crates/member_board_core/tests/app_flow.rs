use member_board_core::db::open_db_in_memory;
use member_board_core::{
    App, AppEvent, FormField, MemberFormData, MemberValidationError, TagCategory, TagDraft,
};
use uuid::Uuid;

fn fill_form(app: &mut App<'_>, name: &str) {
    app.dispatch(AppEvent::FormFieldChanged(FormField::Name, name.to_string()))
        .unwrap();
    app.dispatch(AppEvent::FormFieldChanged(
        FormField::ImageUrl,
        format!("https://example.com/{name}.png"),
    ))
    .unwrap();
}

fn card_names(app: &App<'_>) -> Vec<String> {
    app.screen()
        .unwrap()
        .cards
        .into_iter()
        .map(|card| card.name)
        .collect()
}

#[test]
fn member_tag_lifecycle_updates_every_surface() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();

    app.dispatch(AppEvent::AddMemberClicked).unwrap();
    fill_form(&mut app, "A");
    app.dispatch(AppEvent::FormSubmitted).unwrap();
    assert!(!app.is_form_open());
    assert_eq!(card_names(&app), vec!["A"]);

    app.dispatch(AppEvent::TagManagementOpened).unwrap();
    app.dispatch(AppEvent::TagDraftNameChanged("Lead".to_string()))
        .unwrap();
    app.dispatch(AppEvent::TagDraftCategoryChanged(TagCategory::Position))
        .unwrap();
    app.dispatch(AppEvent::TagSaved).unwrap();
    let catalog = app.tags().list().unwrap();
    assert_eq!(catalog.len(), 1);
    let lead = catalog[0].clone();

    let member_id = app.screen().unwrap().cards[0].member_id;
    app.dispatch(AppEvent::MemberClicked(member_id)).unwrap();
    app.dispatch(AppEvent::EditRequested).unwrap();
    assert!(app.is_form_open());
    assert!(!app.is_detail_open());
    app.dispatch(AppEvent::FormTagToggled(lead.id)).unwrap();
    app.dispatch(AppEvent::FormSubmitted).unwrap();

    app.dispatch(AppEvent::MemberClicked(member_id)).unwrap();
    let detail = app.screen().unwrap().detail.unwrap();
    assert_eq!(detail.chips.len(), 1);
    assert_eq!(detail.chips[0].label, "Lead");
    assert_eq!(detail.chips[0].color, TagCategory::Position.default_color());

    app.dispatch(AppEvent::DeleteRequested).unwrap();
    let screen = app.screen().unwrap();
    assert!(screen.cards.is_empty());
    assert!(screen.detail.is_none());
    // Tag management stayed open throughout.
    assert!(screen.tag_management.is_some());
}

#[test]
fn blank_submission_keeps_form_open_with_errors() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();

    app.dispatch(AppEvent::AddMemberClicked).unwrap();
    app.dispatch(AppEvent::FormSubmitted).unwrap();

    let form = app.screen().unwrap().form.unwrap();
    assert_eq!(
        form.errors,
        vec![
            MemberValidationError::BlankName,
            MemberValidationError::MissingImage
        ]
    );
    assert!(app.members().is_empty().unwrap());
}

#[test]
fn closing_form_discards_edits() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let member = app
        .members()
        .add(&MemberFormData::new("Aiko", "a.png"))
        .unwrap();

    app.dispatch(AppEvent::MemberClicked(member.id)).unwrap();
    app.dispatch(AppEvent::EditRequested).unwrap();
    app.dispatch(AppEvent::FormFieldChanged(
        FormField::Name,
        "discarded".to_string(),
    ))
    .unwrap();
    app.dispatch(AppEvent::FormClosed).unwrap();

    assert!(!app.is_form_open());
    assert_eq!(card_names(&app), vec!["Aiko"]);

    app.dispatch(AppEvent::AddMemberClicked).unwrap();
    let form = app.screen().unwrap().form.unwrap();
    assert_eq!(form.editing, None);
    assert!(form.name.is_empty());
}

#[test]
fn edit_and_delete_require_open_detail() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let member = app
        .members()
        .add(&MemberFormData::new("Aiko", "a.png"))
        .unwrap();

    app.dispatch(AppEvent::MemberClicked(member.id)).unwrap();
    app.dispatch(AppEvent::EditRequested).unwrap();
    app.dispatch(AppEvent::FormClosed).unwrap();
    assert!(!app.is_detail_open());
    assert!(!app.is_form_open());
    assert_eq!(app.members().selected_id(), Some(member.id));

    app.dispatch(AppEvent::EditRequested).unwrap();
    assert!(!app.is_form_open());

    app.dispatch(AppEvent::DeleteRequested).unwrap();
    assert_eq!(card_names(&app), vec!["Aiko"]);

    app.dispatch(AppEvent::MemberClicked(member.id)).unwrap();
    app.dispatch(AppEvent::DeleteRequested).unwrap();
    assert!(app.members().is_empty().unwrap());
    assert!(!app.is_detail_open());
}

#[test]
fn fixed_members_cannot_be_edited_or_deleted() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let fixed = app
        .members()
        .add_fixed(&MemberFormData::new("Showcase", "s.png"))
        .unwrap();

    app.dispatch(AppEvent::MemberClicked(fixed.id)).unwrap();
    let detail = app.screen().unwrap().detail.unwrap();
    assert!(!detail.can_edit);
    assert!(!detail.can_delete);

    app.dispatch(AppEvent::EditRequested).unwrap();
    app.dispatch(AppEvent::DeleteRequested).unwrap();
    assert!(!app.is_form_open());
    assert!(app.is_detail_open());
    assert_eq!(card_names(&app), vec!["Showcase"]);
}

#[test]
fn events_for_unknown_targets_are_ignored() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    app.members()
        .add(&MemberFormData::new("Aiko", "a.png"))
        .unwrap();
    let before = app.screen().unwrap();

    app.dispatch(AppEvent::MemberClicked(Uuid::new_v4())).unwrap();
    app.dispatch(AppEvent::TagEditRequested(Uuid::new_v4()))
        .unwrap();
    app.dispatch(AppEvent::TagDeleteRequested(Uuid::new_v4()))
        .unwrap();
    app.dispatch(AppEvent::EditRequested).unwrap();
    app.dispatch(AppEvent::DeleteRequested).unwrap();
    app.dispatch(AppEvent::DragStarted(5)).unwrap();
    app.dispatch(AppEvent::DroppedAt(0)).unwrap();

    assert_eq!(app.screen().unwrap(), before);
}

#[test]
fn drag_and_drop_reorders_list() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    for name in ["a", "b", "c"] {
        app.members()
            .add(&MemberFormData::new(name, "x.png"))
            .unwrap();
    }

    app.dispatch(AppEvent::DragStarted(0)).unwrap();
    assert_eq!(app.screen().unwrap().dragging, Some(0));
    assert_eq!(app.click_at(1).unwrap(), None);
    app.dispatch(AppEvent::DroppedAt(2)).unwrap();
    assert_eq!(card_names(&app), vec!["b", "c", "a"]);
    assert_eq!(app.screen().unwrap().dragging, None);

    app.dispatch(AppEvent::DragStarted(1)).unwrap();
    app.dispatch(AppEvent::DragCancelled).unwrap();
    app.dispatch(AppEvent::DroppedAt(0)).unwrap();
    assert_eq!(card_names(&app), vec!["b", "c", "a"]);
}

#[test]
fn click_at_selects_member_for_detail() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let member = app
        .members()
        .add(&MemberFormData::new("Aiko", "a.png").with_introduction("hello"))
        .unwrap();

    let event = app.click_at(0).unwrap().unwrap();
    assert_eq!(event, AppEvent::MemberClicked(member.id));
    app.dispatch(event).unwrap();

    let detail = app.screen().unwrap().detail.unwrap();
    assert_eq!(detail.title, "Aiko");
    assert_eq!(detail.introduction, "hello");
    assert!(app.click_at(4).unwrap().is_none());

    app.dispatch(AppEvent::DetailClosed).unwrap();
    assert!(app.screen().unwrap().detail.is_none());
}

#[test]
fn deleting_tag_updates_form_and_members() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let chess = app
        .tags()
        .add(&TagDraft::new("Chess", TagCategory::Hobby))
        .unwrap();
    let member = app
        .members()
        .add(&MemberFormData::new("Aiko", "a.png").with_tags(vec![chess.clone()]))
        .unwrap();

    app.dispatch(AppEvent::MemberClicked(member.id)).unwrap();
    app.dispatch(AppEvent::EditRequested).unwrap();
    app.dispatch(AppEvent::TagManagementOpened).unwrap();
    app.dispatch(AppEvent::TagEditRequested(chess.id)).unwrap();
    app.dispatch(AppEvent::TagDeleteRequested(chess.id)).unwrap();

    let screen = app.screen().unwrap();
    assert!(screen.form.unwrap().tag_options.is_empty());
    let tags = screen.tag_management.unwrap();
    assert_eq!(tags.editing, None);
    assert!(screen.cards[0].chips.is_empty());

    app.dispatch(AppEvent::FormSubmitted).unwrap();
    assert!(app.members().get(member.id).unwrap().unwrap().tags.is_empty());
}

#[test]
fn tag_edit_saves_and_resets_draft() {
    let conn = open_db_in_memory().unwrap();
    let mut app = App::new(&conn).unwrap();
    let chess = app
        .tags()
        .add(&TagDraft::new("Chess", TagCategory::Hobby))
        .unwrap();

    app.dispatch(AppEvent::TagManagementOpened).unwrap();
    app.dispatch(AppEvent::TagEditRequested(chess.id)).unwrap();
    app.dispatch(AppEvent::TagDraftColorChanged("#00FF00".to_string()))
        .unwrap();
    app.dispatch(AppEvent::TagSaved).unwrap();

    let saved = app.tags().get(chess.id).unwrap().unwrap();
    assert_eq!(saved.color.as_deref(), Some("#00ff00"));
    let model = app.screen().unwrap().tag_management.unwrap();
    assert_eq!(model.editing, None);
    assert!(model.draft_name.is_empty());

    app.dispatch(AppEvent::TagDraftColorChanged("teal".to_string()))
        .unwrap();
    app.dispatch(AppEvent::TagSaved).unwrap();
    assert!(app.screen().unwrap().tag_management.unwrap().error.is_some());
    assert_eq!(app.tags().list().unwrap().len(), 1);
}
