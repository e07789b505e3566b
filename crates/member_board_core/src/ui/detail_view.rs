//! Member detail overlay.

use crate::model::member::{Member, MemberId};
use crate::ui::{chips, ImagePreview, TagChip};

/// Rendered detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailModel {
    pub member_id: MemberId,
    pub title: String,
    pub image: ImagePreview,
    pub chips: Vec<TagChip>,
    /// Shown with line breaks preserved.
    pub introduction: String,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Open/closed state of the detail overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDetailView {
    open: bool,
}

impl MemberDetailView {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Renders the bound member; `None` when closed or unbound.
    pub fn render(&self, member: Option<&Member>) -> Option<DetailModel> {
        if !self.open {
            return None;
        }
        let member = member?;
        Some(DetailModel {
            member_id: member.id,
            title: member.name.clone(),
            image: ImagePreview::from_reference(&member.image_url),
            chips: chips(&member.tags),
            introduction: member.introduction.clone(),
            can_edit: member.is_editable,
            can_delete: member.is_editable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemberDetailView;
    use crate::model::member::Member;
    use crate::model::tag::{Tag, TagCategory, TagDraft};
    use crate::ui::ImagePreview;
    use uuid::Uuid;

    fn member(is_editable: bool) -> Member {
        let lead = Tag::from_draft(TagDraft::new("Lead", TagCategory::Position).with_color("#ff0000"))
            .unwrap();
        Member {
            id: Uuid::new_v4(),
            name: "Aiko".to_string(),
            image_url: "data:image/png;base64,AAAA".to_string(),
            introduction: "line one\nline two".to_string(),
            tags: vec![lead],
            is_editable,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn closed_or_unbound_view_renders_nothing() {
        let mut view = MemberDetailView::default();
        assert!(view.render(Some(&member(true))).is_none());

        view.open();
        assert!(view.render(None).is_none());
    }

    #[test]
    fn render_exposes_chips_and_edit_action_for_editable_member() {
        let mut view = MemberDetailView::default();
        view.open();
        let model = view.render(Some(&member(true))).unwrap();

        assert_eq!(model.title, "Aiko");
        assert_eq!(model.chips.len(), 1);
        assert_eq!(model.chips[0].label, "Lead");
        assert_eq!(model.chips[0].color, "#ff0000");
        assert_eq!(model.introduction, "line one\nline two");
        assert!(model.can_edit);
        assert!(matches!(
            model.image,
            ImagePreview::Embedded { ref media_type, .. } if media_type == "image/png"
        ));
    }

    #[test]
    fn read_only_member_hides_edit_and_delete() {
        let mut view = MemberDetailView::default();
        view.open();
        let model = view.render(Some(&member(false))).unwrap();
        assert!(!model.can_edit);
        assert!(!model.can_delete);
    }
}
