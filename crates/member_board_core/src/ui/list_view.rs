//! Member list view with drag-to-reorder.

use crate::model::member::{Member, MemberId};
use crate::ui::{chips, ImagePreview, TagChip};

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCard {
    pub member_id: MemberId,
    pub name: String,
    pub image: ImagePreview,
    pub chips: Vec<TagChip>,
}

/// Actions the list emits towards the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Select(MemberId),
    Reorder { from: usize, to: usize },
}

/// Drag gesture state for the member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListView {
    dragging: Option<usize>,
}

impl MemberListView {
    /// Cards in store order.
    pub fn cards(members: &[Member]) -> Vec<MemberCard> {
        members
            .iter()
            .map(|member| MemberCard {
                member_id: member.id,
                name: member.name.clone(),
                image: ImagePreview::from_reference(&member.image_url),
                chips: chips(&member.tags),
            })
            .collect()
    }

    /// Click on the entry at `index`; ignored while dragging.
    pub fn click(&self, members: &[Member], index: usize) -> Option<ListAction> {
        if self.dragging.is_some() {
            return None;
        }
        members
            .get(index)
            .map(|member| ListAction::Select(member.id))
    }

    /// Starts dragging the entry at `index`; returns whether a drag began.
    pub fn begin_drag(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.dragging = Some(index);
        true
    }

    /// Ends the gesture over `index`.
    ///
    /// Dropping outside the list or on the origin ends the drag without a
    /// reorder.
    pub fn drop_at(&mut self, index: usize, len: usize) -> Option<ListAction> {
        let from = self.dragging.take()?;
        if index >= len || index == from {
            return None;
        }
        Some(ListAction::Reorder { from, to: index })
    }

    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::{ListAction, MemberListView};

    #[test]
    fn drop_on_other_index_emits_reorder() {
        let mut view = MemberListView::default();
        assert!(view.begin_drag(0, 3));
        assert_eq!(view.dragging(), Some(0));
        assert_eq!(
            view.drop_at(2, 3),
            Some(ListAction::Reorder { from: 0, to: 2 })
        );
        assert_eq!(view.dragging(), None);
    }

    #[test]
    fn drop_on_origin_or_outside_is_ignored() {
        let mut view = MemberListView::default();
        view.begin_drag(1, 3);
        assert_eq!(view.drop_at(1, 3), None);

        view.begin_drag(1, 3);
        assert_eq!(view.drop_at(7, 3), None);
        assert_eq!(view.dragging(), None);
    }

    #[test]
    fn drop_without_drag_and_out_of_range_drag_do_nothing() {
        let mut view = MemberListView::default();
        assert_eq!(view.drop_at(0, 2), None);
        assert!(!view.begin_drag(2, 2));
        assert_eq!(view.dragging(), None);
    }
}
