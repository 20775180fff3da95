//! Style change dispatch
//!
//! Callbacks subscribe to a set of [`StyleField`]s. A dispatch cycle receives
//! every field that changed in one edit and runs each interested callback
//! exactly once, however many of its fields changed.

use glyphview_core::{Result, StyleField};
use std::collections::BTreeSet;

/// Style fields whose change requires rebuilding the displayed model
pub const REBUILD_FIELDS: [StyleField; 11] = [
    StyleField::ColorMode,
    StyleField::ColorAttribute,
    StyleField::ColorValueMin,
    StyleField::ColorValueMax,
    StyleField::Colormap,
    StyleField::FixedColor,
    StyleField::FixedSize,
    StyleField::SizeScaling,
    StyleField::SizeMode,
    StyleField::SizeValueMin,
    StyleField::SizeValueMax,
];

/// Callback run with mutable access to the dispatch context
pub type Callback<C> = Box<dyn FnMut(&mut C) -> Result<()>>;

/// Handle returned by [`ChangeDispatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

struct Subscription<C> {
    id: SubscriptionId,
    fields: BTreeSet<StyleField>,
    callback: Callback<C>,
}

/// Registry of field-set callbacks over a context `C`
pub struct ChangeDispatcher<C> {
    subscriptions: Vec<Subscription<C>>,
    next_id: usize,
}

impl<C> ChangeDispatcher<C> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Run `callback` whenever any of `fields` changes
    pub fn subscribe<F>(&mut self, fields: &[StyleField], callback: F) -> SubscriptionId
    where
        F: FnMut(&mut C) -> Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            fields: fields.iter().copied().collect(),
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Run every subscription interested in `changed`, in subscription order.
    ///
    /// Stops at the first failing callback. Returns how many callbacks ran.
    pub fn dispatch(&mut self, changed: &[StyleField], context: &mut C) -> Result<usize> {
        if changed.is_empty() {
            return Ok(0);
        }

        let mut fired = 0;
        for subscription in &mut self.subscriptions {
            if changed.iter().any(|f| subscription.fields.contains(f)) {
                tracing::debug!(
                    changed = ?changed,
                    subscription = subscription.id.0,
                    "style change dispatched"
                );
                (subscription.callback)(context)?;
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Run every subscription once regardless of fields
    pub fn dispatch_all(&mut self, context: &mut C) -> Result<usize> {
        for subscription in &mut self.subscriptions {
            (subscription.callback)(context)?;
        }
        Ok(self.subscriptions.len())
    }
}

impl<C> Default for ChangeDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
