#![forbid(unsafe_code)]

//! Transient toast notifications.
//!
//! At most one toast is ever visible. Showing a new one removes the current
//! toast immediately — there is no queue, no backlog — and cancels its
//! pending dismiss chain. Dismissal is two-phase: after the display TTL the
//! toast gains `fade-out`, and after the fade it is removed from the tree.
//!
//! A generation counter guards every timer token: a timer that fires after
//! its toast was superseded sees a stale generation and does nothing, so no
//! dangling timer ever acts on removed state.

use pagekit_core::timer::{TimerId, Timers};
use pagekit_dom::{Document, NodeId};
use tracing::{debug, trace};
use web_time::Duration;

use crate::controller::TimerToken;

/// Base class on every toast element.
pub const NOTIFICATION_CLASS: &str = "notification";

/// Class added when the dismiss fade begins.
pub const FADE_OUT_CLASS: &str = "fade-out";

/// How long a toast stays fully visible.
pub(crate) const TOAST_TTL: Duration = Duration::from_millis(3000);

/// Fade-out duration before removal.
pub(crate) const TOAST_FADE: Duration = Duration::from_millis(300);

/// Toast severity, reflected as a class on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Confirmation of a completed action.
    Success,
    /// Something went wrong.
    Error,
    /// Neutral information (default).
    #[default]
    Info,
}

impl Severity {
    /// The class name carried on the toast element.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Single-active toast lifecycle manager.
#[derive(Debug)]
pub(crate) struct Notifier {
    /// Parent element for toast nodes.
    host: NodeId,
    /// The live toast, visible or fading.
    node: Option<NodeId>,
    /// Bumped on every `show`; timer tokens carry the generation they belong to.
    generation: u64,
    dismiss: Option<TimerId>,
    remove: Option<TimerId>,
}

impl Notifier {
    pub(crate) fn new(host: NodeId) -> Self {
        Self {
            host,
            node: None,
            generation: 0,
            dismiss: None,
            remove: None,
        }
    }

    /// Show a toast, superseding any current one.
    pub(crate) fn show(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers<TimerToken>,
        message: &str,
        severity: Severity,
    ) {
        if let Some(old) = self.node.take() {
            doc.remove(old);
        }
        if let Some(id) = self.dismiss.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.remove.take() {
            timers.cancel(id);
        }
        self.generation += 1;

        let toast = doc.create_element("div");
        doc.add_class(toast, NOTIFICATION_CLASS);
        doc.add_class(toast, severity.class_name());
        doc.set_text(toast, message);
        doc.append_child(self.host, toast);
        self.node = Some(toast);
        self.dismiss = Some(timers.schedule(
            TOAST_TTL,
            TimerToken::ToastDismiss {
                generation: self.generation,
            },
        ));
        debug!(severity = severity.class_name(), %message, "toast shown");
    }

    /// TTL elapsed: begin the fade and schedule removal.
    pub(crate) fn handle_dismiss(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers<TimerToken>,
        generation: u64,
    ) {
        if generation != self.generation {
            trace!(generation, "stale toast dismiss ignored");
            return;
        }
        self.dismiss = None;
        if let Some(toast) = self.node {
            doc.add_class(toast, FADE_OUT_CLASS);
        }
        self.remove = Some(timers.schedule(TOAST_FADE, TimerToken::ToastRemove { generation }));
    }

    /// Fade elapsed: remove the toast from the tree.
    pub(crate) fn handle_remove(&mut self, doc: &mut Document, generation: u64) {
        if generation != self.generation {
            trace!(generation, "stale toast removal ignored");
            return;
        }
        self.remove = None;
        if let Some(toast) = self.node.take() {
            doc.remove(toast);
            debug!("toast removed");
        }
    }

    /// The live toast element, if one is showing or fading.
    pub(crate) fn active(&self) -> Option<NodeId> {
        self.node
    }
}
