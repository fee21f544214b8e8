use crate::{IdGenerator, Popup, PopupId};
use serde_json::Value;

/// Inserts or replaces `popup` inside `popups` and returns the stored record.
///
/// - id equal to an existing record's id: the first match is replaced in place
/// - id present but unmatched: appended as-is
/// - no id: a fresh id is generated, then appended
pub fn upsert(popups: &mut Vec<Popup>, mut popup: Popup, ids: &IdGenerator) -> Popup {
    match popup.assigned_id().cloned() {
        Some(key) => match popups.iter_mut().find(|p| p.id.as_ref() == Some(&key)) {
            Some(slot) => *slot = popup.clone(),
            None => popups.push(popup.clone()),
        },
        None => {
            let floor = popups.iter().filter_map(Popup::numeric_id).max().unwrap_or(0);
            popup.id = Some(Value::from(ids.next(floor)));
            popups.push(popup.clone());
        }
    }
    popup
}

/// Drops every record whose numeric id is `id`. Returns how many went;
/// `None` matches nothing.
pub fn remove(popups: &mut Vec<Popup>, id: Option<PopupId>) -> usize {
    let Some(id) = id else {
        return 0;
    };
    let before = popups.len();
    popups.retain(|p| !p.has_id(id));
    before - popups.len()
}
