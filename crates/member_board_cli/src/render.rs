//! Plain-text rendering of the board.

use member_board_core::ui::detail_view::DetailModel;
use member_board_core::ui::form_view::FormModel;
use member_board_core::ui::tag_view::TagManagementModel;
use member_board_core::ui::{ImagePreview, TagChip};
use member_board_core::{Screen, Tag, TagId};
use std::fmt::Write;

/// Renders every visible surface. Catalog tags are numbered by their
/// position in `catalog`, matching `toggle N` and `tag-edit N`.
pub fn render_screen(screen: &Screen, catalog: &[Tag]) -> String {
    let mut out = String::new();
    render_list(&mut out, screen);
    if let Some(detail) = &screen.detail {
        render_detail(&mut out, detail);
    }
    if let Some(form) = &screen.form {
        render_form(&mut out, form);
    }
    if let Some(model) = &screen.tag_management {
        render_tag_management(&mut out, model, catalog);
    }
    out
}

fn render_list(out: &mut String, screen: &Screen) {
    let _ = writeln!(out, "== Members ({}) ==", screen.cards.len());
    if screen.cards.is_empty() {
        let _ = writeln!(out, "  (no members yet, use `add`)");
    }
    for (index, card) in screen.cards.iter().enumerate() {
        let marker = if screen.dragging == Some(index) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker}{:>2}. {} [{}] {}",
            index + 1,
            card.name,
            image_label(&card.image),
            chip_list(&card.chips)
        );
    }
}

fn render_detail(out: &mut String, detail: &DetailModel) {
    let _ = writeln!(out, "== {} ==", detail.title);
    let _ = writeln!(out, "  image: {}", image_label(&detail.image));
    let _ = writeln!(out, "  tags:  {}", chip_list(&detail.chips));
    for line in detail.introduction.lines() {
        let _ = writeln!(out, "  | {line}");
    }
    if detail.can_edit {
        let _ = writeln!(out, "  actions: edit, delete, close");
    } else {
        let _ = writeln!(out, "  (read-only profile) actions: close");
    }
}

fn render_form(out: &mut String, form: &FormModel) {
    let title = if form.editing.is_some() {
        "Edit member"
    } else {
        "New member"
    };
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "  name:  {}", form.name);
    let image = if form.has_image_data {
        "(embedded image)"
    } else {
        form.image_url.as_str()
    };
    let _ = writeln!(out, "  image: {image}");
    let _ = writeln!(out, "  intro: {}", form.introduction.replace('\n', "\\n"));
    for (index, option) in form.tag_options.iter().enumerate() {
        let check = if option.selected { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "  [{check}] {}. {}",
            index + 1,
            chip_label(&option.chip)
        );
    }
    for err in &form.errors {
        let _ = writeln!(out, "  ! {err}");
    }
}

fn render_tag_management(out: &mut String, model: &TagManagementModel, catalog: &[Tag]) {
    let _ = writeln!(out, "== Tags ==");
    for section in &model.sections {
        let _ = writeln!(out, "  {}:", section.category);
        if section.rows.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for row in &section.rows {
            let marker = if row.editing { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "   {marker}{}. {}",
                catalog_number(catalog, row.chip.tag_id),
                chip_label(&row.chip)
            );
        }
    }
    let mode = if model.editing.is_some() {
        "editing"
    } else {
        "new"
    };
    let color = if model.draft_color.is_empty() {
        "(default)"
    } else {
        model.draft_color.as_str()
    };
    let _ = writeln!(
        out,
        "  draft ({mode}): name={:?} category={} color={color}",
        model.draft_name, model.draft_category
    );
    if let Some(err) = &model.error {
        let _ = writeln!(out, "  ! {err}");
    }
}

fn catalog_number(catalog: &[Tag], id: TagId) -> String {
    catalog
        .iter()
        .position(|tag| tag.id == id)
        .map(|index| (index + 1).to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn image_label(image: &ImagePreview) -> String {
    match image {
        ImagePreview::Url(url) => url.clone(),
        ImagePreview::Embedded { media_type, .. } => format!("embedded {media_type}"),
    }
}

fn chip_label(chip: &TagChip) -> String {
    format!("{} ({})", chip.label, chip.color)
}

fn chip_list(chips: &[TagChip]) -> String {
    chips
        .iter()
        .map(|chip| format!("#{}", chip.label))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::render_screen;
    use member_board_core::db::open_db_in_memory;
    use member_board_core::{App, AppEvent, MemberFormData, TagCategory, TagDraft};

    #[test]
    fn renders_cards_detail_and_catalog_numbers() {
        let conn = open_db_in_memory().unwrap();
        let mut app = App::new(&conn).unwrap();
        let chess = app
            .tags()
            .add(&TagDraft::new("Chess", TagCategory::Hobby))
            .unwrap();
        app.tags()
            .add(&TagDraft::new("Lead", TagCategory::Position))
            .unwrap();
        let member = app
            .members()
            .add(&MemberFormData::new("Aiko", "a.png").with_tags(vec![chess]))
            .unwrap();
        app.dispatch(AppEvent::MemberClicked(member.id)).unwrap();
        app.dispatch(AppEvent::TagManagementOpened).unwrap();

        let catalog = app.tags().list().unwrap();
        let text = render_screen(&app.screen().unwrap(), &catalog);

        assert!(text.contains("  1. Aiko [a.png] #Chess"));
        assert!(text.contains("== Aiko =="));
        assert!(text.contains("2. Lead (#1976d2)"));
        assert!(text.contains("1. Chess (#2e7d32)"));
    }

    #[test]
    fn empty_board_shows_hint() {
        let conn = open_db_in_memory().unwrap();
        let app = App::new(&conn).unwrap();
        let text = render_screen(&app.screen().unwrap(), &[]);
        assert!(text.contains("== Members (0) =="));
        assert!(text.contains("no members yet"));
    }
}
