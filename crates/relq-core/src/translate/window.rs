//! OVER clause rendering.

use tracing::warn;

use crate::ast::Frame;

use super::Translator;

/// Appends an OVER clause to `call`.
///
/// The frame is only emitted when there is an ordering, since a frame
/// over unordered rows has no meaning.
#[must_use]
pub fn over(call: &str, partition: &[String], order: &[String], frame: Option<&Frame>) -> String {
    let mut parts = Vec::new();
    if !partition.is_empty() {
        parts.push(format!("PARTITION BY {}", partition.join(", ")));
    }
    if !order.is_empty() {
        parts.push(format!("ORDER BY {}", order.join(", ")));
        if let Some(frame) = frame {
            parts.push(frame.to_sql());
        }
    }
    format!("{call} OVER ({})", parts.join(" "))
}

/// Windowed aggregate using the translator's partition, order and frame.
#[must_use]
pub fn window_aggregate(tr: &Translator<'_>, call: &str) -> String {
    let window = tr.window();
    over(call, &window.partition, &window.order, window.frame.as_ref())
}

/// Running aggregate from the first row of the partition to the
/// current one.
#[must_use]
pub fn window_cumulative(tr: &Translator<'_>, call: &str) -> String {
    let window = tr.window();
    if window.order.is_empty() {
        warn!(
            call,
            dialect = tr.profile().name(),
            "cumulative window function has no ordering; result is order-dependent"
        );
    }
    over(
        call,
        &window.partition,
        &window.order,
        Some(&Frame::cumulative()),
    )
}

/// Ranking or offset function. `order` replaces the translator's
/// ordering when given. No frame is emitted.
#[must_use]
pub fn window_ranked(tr: &Translator<'_>, call: &str, order: Option<&[String]>) -> String {
    let window = tr.window();
    over(
        call,
        &window.partition,
        order.unwrap_or(&window.order),
        None,
    )
}
