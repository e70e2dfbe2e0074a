// ── Loading status model ──
//
// One slot maps to unknown/loading/ready/error; composing many slots
// merges by a fixed priority. The merge order decides whether a
// dashboard shows a full spinner, a partial-data view, or an error
// banner, so it must not change.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Loading status of one slot or a composition of slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Unknown,
    Loading,
    Ready,
    Error,
    PartiallyLoaded,
}

/// Merge many statuses into one.
///
/// Priority: any error wins; then an explicit partially-loaded; then
/// loading (downgraded to partially-loaded when some inputs are already
/// ready); then ready; unknown only when nothing else applies.
pub fn merge_statuses(statuses: impl IntoIterator<Item = Status>) -> Status {
    let mut any_loading = false;
    let mut any_ready = false;
    let mut any_partial = false;

    for status in statuses {
        match status {
            Status::Error => return Status::Error,
            Status::PartiallyLoaded => any_partial = true,
            Status::Loading => any_loading = true,
            Status::Ready => any_ready = true,
            Status::Unknown => {}
        }
    }

    if any_partial {
        Status::PartiallyLoaded
    } else if any_loading {
        if any_ready {
            Status::PartiallyLoaded
        } else {
            Status::Loading
        }
    } else if any_ready {
        Status::Ready
    } else {
        Status::Unknown
    }
}
