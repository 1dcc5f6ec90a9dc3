use alloc::vec::Vec;
use core::mem;

use crate::error::{RenderResult, VirtualListError};
use crate::key::{KeyCacheKey, KeyMap};
use crate::store::ItemStore;
use crate::surface::Surface;
use crate::{RenderStats, Window};

/// A node currently attached to the surface, with the identity it was rendered for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered<K, N> {
    pub key: K,
    /// Position of the item in the current data set.
    pub index: usize,
    pub node: N,
}

enum Source<N> {
    Prior(usize),
    Fresh(N),
}

/// Brings `rendered` (and the surface) in line with the items in `window`.
///
/// Nodes are matched by key: a node whose key is still in the window is moved over as-is,
/// every other item gets a fresh node from `render`. All fresh nodes are produced before the
/// surface is touched, so a renderer failure leaves `rendered` and the surface unchanged.
/// Stale nodes are then detached and the new list is appended in one batch.
///
/// When several items share a key only the one the store resolves the key to is rendered.
pub(crate) fn reconcile<T, K, S>(
    rendered: &mut Vec<Rendered<K, S::Node>>,
    store: &ItemStore<T, K>,
    window: Window,
    render: &dyn Fn(&T) -> RenderResult<S::Node>,
    surface: &mut S,
) -> Result<RenderStats, VirtualListError<K>>
where
    K: KeyCacheKey,
    S: Surface,
{
    let prior_at: KeyMap<K, usize> = rendered
        .iter()
        .enumerate()
        .map(|(pos, entry)| (entry.key.clone(), pos))
        .collect();

    let mut plan = Vec::with_capacity(window.len());
    for index in window.start..window.end {
        let (Some(key), Some(item)) = (store.key(index), store.item(index)) else {
            break;
        };
        if store.index_of(key) != Some(index) {
            vwarn!(index, "skipping item shadowed by a later duplicate key");
            continue;
        }
        match prior_at.get(key) {
            Some(&pos) => plan.push((index, Source::Prior(pos))),
            None => match render(item) {
                Ok(node) => plan.push((index, Source::Fresh(node))),
                Err(failure) => {
                    vwarn!(index, error = %failure, "item renderer failed; pass abandoned");
                    return Err(VirtualListError::RenderFailed {
                        index,
                        key: key.clone(),
                        failure,
                    });
                }
            },
        }
    }

    let mut stats = RenderStats::default();
    let mut prior: Vec<Option<Rendered<K, S::Node>>> =
        mem::take(rendered).into_iter().map(Some).collect();
    let mut next = Vec::with_capacity(plan.len());
    for (index, source) in plan {
        match source {
            Source::Prior(pos) => {
                let Some(mut entry) = prior.get_mut(pos).and_then(Option::take) else {
                    continue;
                };
                entry.index = index;
                stats.reused += 1;
                next.push(entry);
            }
            Source::Fresh(node) => {
                let Some(key) = store.key(index) else {
                    continue;
                };
                stats.created += 1;
                next.push(Rendered {
                    key: key.clone(),
                    index,
                    node,
                });
            }
        }
    }

    for stale in prior.into_iter().flatten() {
        surface.detach(&stale.node);
        stats.removed += 1;
    }

    surface.append(next.iter().map(|entry| &entry.node));
    *rendered = next;

    vtrace!(
        created = stats.created,
        reused = stats.reused,
        removed = stats.removed,
        "reconcile"
    );
    Ok(stats)
}
