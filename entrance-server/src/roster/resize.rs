//! Booth roster resizer
//!
//! An edit of one badge rewrites the shared fields of its whole booth group
//! and then grows or shrinks the group to the requested headcount.

use super::{RosterError, next_code};
use crate::db::repository::StaffStore;
use crate::qr::QrGenerator;
use serde::Serialize;
use shared::models::{BoothFields, Staff, StaffCreate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeOutcome {
    /// `None` when the shrink removed the anchor itself
    pub anchor: Option<Staff>,
    pub created: Vec<Staff>,
    pub deleted: Vec<i64>,
    pub group_size: usize,
    /// Requested count was not a non-negative integer; membership untouched
    pub count_ignored: bool,
}

/// Desired headcount, `None` when the input is not a non-negative integer
pub fn parse_count(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Apply `fields` to the anchor's booth group and resize it to `desired`.
///
/// The group is re-read after the overwrite, so an edit that moves the
/// booth into an existing group resizes the merged group. Shrinking removes
/// the other members before the anchor. Not transactional: a failure midway
/// leaves the records written so far in place.
pub async fn resize<S: StaffStore + ?Sized>(
    store: &S,
    qr: &QrGenerator,
    anchor_id: i64,
    fields: BoothFields,
    desired: &str,
) -> Result<ResizeOutcome, RosterError> {
    let anchor = store
        .find_by_id(anchor_id)
        .await?
        .ok_or(RosterError::NotFound(anchor_id))?;
    let desired_count = parse_count(desired);

    let touched = store
        .update_group(anchor.booth_id.as_deref(), anchor.location, &fields)
        .await?;
    tracing::debug!(anchor_id, touched, "Booth group fields overwritten");

    let group = store
        .find_group(fields.booth_id.as_deref(), fields.location)
        .await?;
    let current = group.len();

    let mut created = Vec::new();
    let mut deleted = Vec::new();

    match desired_count {
        None => {
            if !desired.trim().is_empty() {
                tracing::warn!(anchor_id, desired = %desired, "Unparseable staff count, membership unchanged");
            }
        }
        Some(target) if target > current => {
            for _ in current..target {
                let code = next_code(store, fields.location, fields.staff_type).await?;
                let mut member = store
                    .create(StaffCreate {
                        name: fields.name.clone(),
                        phone_number: fields.phone_number.clone(),
                        booth_id: fields.booth_id.clone(),
                        location: fields.location,
                        staff_type: fields.staff_type,
                        staff_code: code.into_string(),
                        sold: false,
                    })
                    .await?;
                let path = qr.generate(&member.staff_code)?;
                let path = path.to_string_lossy().into_owned();
                store.set_qr_path(member.id, &path).await?;
                member.qr_code_path = Some(path);
                created.push(member);
            }
        }
        Some(target) if target < current => {
            let victims = group
                .iter()
                .filter(|s| s.id != anchor_id)
                .chain(group.iter().filter(|s| s.id == anchor_id))
                .take(current - target);
            for victim in victims {
                if store.delete(victim.id).await? {
                    deleted.push(victim.id);
                }
            }
        }
        Some(_) => {}
    }

    let mut anchor = store.find_by_id(anchor_id).await?;
    if let Some(a) = anchor.as_mut()
        && a.qr_code_path.is_none()
    {
        let path = qr.generate(&a.staff_code)?.to_string_lossy().into_owned();
        store.set_qr_path(a.id, &path).await?;
        a.qr_code_path = Some(path);
    }

    let group_size = current + created.len() - deleted.len();
    tracing::info!(
        anchor_id,
        group_size,
        created = created.len(),
        deleted = deleted.len(),
        "Booth roster resized"
    );

    Ok(ResizeOutcome {
        anchor,
        created,
        deleted,
        group_size,
        count_ignored: desired_count.is_none(),
    })
}
