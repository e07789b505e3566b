//! Demo data for a fresh session.

use crate::app::{App, AppError};
use crate::model::member::MemberFormData;
use crate::model::tag::{TagCategory, TagDraft};
use log::info;

/// Adds one tag per category and two members; the first member is
/// read-only.
pub fn seed_demo(app: &App<'_>) -> Result<(), AppError> {
    let lead = app
        .tags()
        .add(&TagDraft::new("Team Lead", TagCategory::Position).with_color("#1565c0"))?;
    let climbing = app
        .tags()
        .add(&TagDraft::new("Climbing", TagCategory::Hobby))?;
    let remote = app
        .tags()
        .add(&TagDraft::new("Remote", TagCategory::Other).with_color("#6a1b9a"))?;

    app.members().add_fixed(
        &MemberFormData::new("Haruka Sato", "https://example.com/images/haruka.jpg")
            .with_introduction("Runs the platform team.\nAsk me about release trains.")
            .with_tags(vec![lead, remote.clone()]),
    )?;
    app.members().add(
        &MemberFormData::new("Kenji Mori", "https://example.com/images/kenji.jpg")
            .with_introduction("Backend engineer, weekend boulderer.")
            .with_tags(vec![climbing, remote]),
    )?;

    info!("event=seed_demo module=seed status=ok tags=3 members=2");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::seed_demo;
    use crate::app::App;
    use crate::db::open_db_in_memory;

    #[test]
    fn seed_demo_creates_catalog_and_members() {
        let conn = open_db_in_memory().unwrap();
        let app = App::new(&conn).unwrap();
        seed_demo(&app).unwrap();

        assert_eq!(app.tags().list().unwrap().len(), 3);
        let members = app.members().list().unwrap();
        assert_eq!(members.len(), 2);
        assert!(!members[0].is_editable);
        assert!(members[1].is_editable);
        assert_eq!(members[1].tags[0].name, "Climbing");
    }
}
