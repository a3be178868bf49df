//! Stop auto-layout
//!
//! Computes evenly spaced default positions for color stops and hints and
//! merges them with explicit positions. A value the layout stamped itself
//! (recorded in `auto`) is replaced on the next pass, so changing the number
//! of stops re-spaces everything that was never pinned.

use crate::model::{Origin, StopOrHint, StopPosition};

/// Default position for every entry, in document order.
///
/// The k-th color stop defaults to `k * increment` (a 99 is snapped to 100
/// so the last stop lands on the end), the k-th hint to
/// `hint_offset + k * increment`.
pub fn default_positions(stops: &[StopOrHint]) -> Vec<f64> {
    let colors = stops.iter().filter(|entry| entry.is_stop()).count();
    let spacing = if colors > 1 {
        100.0 / (colors - 1) as f64
    } else {
        100.0
    };
    let increment = spacing.round();
    let hint_offset = (spacing / 2.0).round();

    let mut stop_index = 0.0;
    let mut hint_index = 0.0;
    stops
        .iter()
        .map(|entry| match entry {
            StopOrHint::Stop(_) => {
                let position = increment * stop_index;
                stop_index += 1.0;
                if position == 99.0 { 100.0 } else { position }
            }
            StopOrHint::Hint(_) => {
                let position = hint_offset + increment * hint_index;
                hint_index += 1.0;
                position
            }
        })
        .collect()
}

/// Run one auto-layout pass.
///
/// Unset positions take the new default; a start equal to the previous
/// default is treated as unset, an end only when layout filled it. Explicit
/// values are never touched, and a stop marked [`Origin::Explicit`] is
/// skipped once and then reset.
/// Repeating the pass without edits in between changes nothing.
pub fn update_stops(mut stops: Vec<StopOrHint>) -> Vec<StopOrHint> {
    let defaults = default_positions(&stops);
    let single = stops.iter().filter(|entry| entry.is_stop()).count() == 1;

    for (entry, auto) in stops.iter_mut().zip(defaults) {
        match entry {
            StopOrHint::Stop(stop) => {
                if single {
                    stop.position1 = Some(StopPosition::Percent(0.0));
                    stop.position2 = Some(StopPosition::Percent(100.0));
                    stop.end_auto = true;
                } else if stop.origin == Origin::Explicit {
                    stop.origin = Origin::AutoAssigned;
                } else {
                    if stop.position1.is_none_or(|p| stop.is_auto_position(p)) {
                        stop.position1 = Some(StopPosition::Percent(auto));
                    }

                    // Only an end that layout itself copied moves with the start
                    if stop.position2.is_none() || stop.end_auto {
                        stop.position2 = stop.position1;
                        stop.end_auto = true;
                    }
                }
                stop.auto = Some(auto);
            }
            StopOrHint::Hint(hint) => {
                let managed = match (hint.percentage, hint.auto) {
                    (None, _) => true,
                    (Some(percentage), Some(previous)) => percentage == previous,
                    (Some(_), None) => false,
                };
                if managed {
                    hint.percentage = Some(auto);
                }
                hint.auto = Some(auto);
            }
        }
    }

    tracing::trace!("Laid out {} stop entries", stops.len());
    stops
}

/// Remove the entry pair starting at `pair_index` (a stop and its hint).
///
/// If that leaves the list ending at `pair_index`, the dangling tail entry
/// is dropped too. Callers re-run [`update_stops`] afterwards.
pub fn remove_stop(mut stops: Vec<StopOrHint>, pair_index: usize) -> Vec<StopOrHint> {
    let start = pair_index.min(stops.len());
    let end = pair_index.saturating_add(2).min(stops.len());
    stops.drain(start..end);

    if stops.len() == pair_index {
        stops.pop();
    }
    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorStop, Hint};

    fn stop(color: &str) -> StopOrHint {
        ColorStop::new(color).into()
    }

    fn hint() -> StopOrHint {
        Hint::unset().into()
    }

    fn interleaved(colors: &[&str]) -> Vec<StopOrHint> {
        let mut stops = Vec::new();
        for (i, color) in colors.iter().enumerate() {
            if i > 0 {
                stops.push(hint());
            }
            stops.push(stop(color));
        }
        stops
    }

    fn stop_at(stops: &[StopOrHint], index: usize) -> &ColorStop {
        stops[index].as_stop().expect("color stop")
    }

    fn hint_at(stops: &[StopOrHint], index: usize) -> Option<f64> {
        stops[index].as_hint().expect("hint").percentage
    }

    #[test]
    fn test_default_positions_two_stops() {
        assert_eq!(default_positions(&interleaved(&["a", "b"])), vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_default_positions_four_stops_snap() {
        let defaults = default_positions(&interleaved(&["a", "b", "c", "d"]));
        assert_eq!(defaults, vec![0.0, 17.0, 33.0, 50.0, 66.0, 83.0, 100.0]);
    }

    #[test]
    fn test_default_positions_without_hints() {
        let stops = vec![stop("a"), stop("b"), stop("c")];
        assert_eq!(default_positions(&stops), vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_two_stops_span_axis() {
        let stops = update_stops(interleaved(&["red", "blue"]));
        assert_eq!(stop_at(&stops, 0).position1, Some(StopPosition::Percent(0.0)));
        assert_eq!(stop_at(&stops, 0).position2, Some(StopPosition::Percent(0.0)));
        assert_eq!(hint_at(&stops, 1), Some(50.0));
        assert_eq!(stop_at(&stops, 2).position1, Some(StopPosition::Percent(100.0)));
        assert_eq!(stop_at(&stops, 2).auto, Some(100.0));
    }

    #[test]
    fn test_three_stops_midpoints() {
        let stops = update_stops(interleaved(&["red", "green", "blue"]));
        assert_eq!(stop_at(&stops, 2).position1, Some(StopPosition::Percent(50.0)));
        assert_eq!(hint_at(&stops, 1), Some(25.0));
        assert_eq!(hint_at(&stops, 3), Some(75.0));
    }

    #[test]
    fn test_single_stop_spans_everything() {
        let stops = update_stops(vec![stop("red")]);
        assert_eq!(stop_at(&stops, 0).position1, Some(StopPosition::Percent(0.0)));
        assert_eq!(stop_at(&stops, 0).position2, Some(StopPosition::Percent(100.0)));
    }

    #[test]
    fn test_explicit_span_survives_passes() {
        let mut stops = interleaved(&["#fff", "#000"]);
        stops[2] = ColorStop::new("#000")
            .with_positions(Some(StopPosition::Unitless(0.0)), Some(StopPosition::Unitless(20.0)))
            .into();

        let mut stops = update_stops(stops);
        stops = update_stops(stops);
        stops = update_stops(stops);

        let end = stop_at(&stops, 2);
        assert_eq!(end.position1, Some(StopPosition::Unitless(0.0)));
        assert_eq!(end.position2, Some(StopPosition::Unitless(20.0)));
    }

    #[test]
    fn test_explicit_start_fills_end() {
        let mut stops = interleaved(&["red", "blue"]);
        stops[0] = ColorStop::new("red")
            .with_positions(Some(StopPosition::Percent(30.0)), None)
            .into();
        let stops = update_stops(stops);
        assert_eq!(stop_at(&stops, 0).position2, Some(StopPosition::Percent(30.0)));
    }

    #[test]
    fn test_auto_positions_respace_on_growth() {
        let stops = update_stops(interleaved(&["red", "green", "blue"]));
        let mut grown = stops.clone();
        grown.push(hint());
        grown.push(stop("black"));

        let grown = update_stops(grown);
        let middle = stop_at(&grown, 2);
        assert_eq!(middle.position1, Some(StopPosition::Percent(33.0)));
        assert_eq!(middle.position2, Some(StopPosition::Percent(33.0)));
        assert_eq!(hint_at(&grown, 1), Some(17.0));
    }

    #[test]
    fn test_authored_end_survives_growth() {
        let mut stops = interleaved(&["red", "green", "blue"]);
        stops[2] = ColorStop::new("green")
            .with_positions(None, Some(StopPosition::Percent(50.0)))
            .into();
        let mut grown = update_stops(stops);
        assert_eq!(stop_at(&grown, 2).position1, Some(StopPosition::Percent(50.0)));
        assert!(!stop_at(&grown, 2).end_auto);

        grown.push(hint());
        grown.push(stop("black"));
        let grown = update_stops(grown);
        let middle = stop_at(&grown, 2);
        assert_eq!(middle.position1, Some(StopPosition::Percent(33.0)));
        assert_eq!(middle.position2, Some(StopPosition::Percent(50.0)));
    }

    #[test]
    fn test_single_stop_end_respaces_on_growth() {
        let mut stops = update_stops(vec![stop("red")]);
        stops.push(hint());
        stops.push(stop("blue"));
        let stops = update_stops(stops);
        assert_eq!(stop_at(&stops, 0).position2, Some(StopPosition::Percent(0.0)));
    }

    #[test]
    fn test_edited_hint_is_kept() {
        let mut stops = update_stops(interleaved(&["red", "blue"]));
        stops[1] = Hint { auto: Some(50.0), percentage: Some(20.0) }.into();
        let stops = update_stops(stops);
        assert_eq!(hint_at(&stops, 1), Some(20.0));
    }

    #[test]
    fn test_pinned_stop_skipped_once() {
        let mut stops = update_stops(interleaved(&["red", "green", "blue"]));
        if let StopOrHint::Stop(stop) = &mut stops[2] {
            // Pinning to the current auto value would normally read as unset
            stop.pin(Some(StopPosition::Percent(50.0)), None);
        }

        let stops = update_stops(stops);
        let pinned = stop_at(&stops, 2);
        assert_eq!(pinned.position1, Some(StopPosition::Percent(50.0)));
        assert_eq!(pinned.position2, None);
        assert_eq!(pinned.origin, Origin::AutoAssigned);
    }

    #[test]
    fn test_idempotent() {
        let once = update_stops(interleaved(&["a", "b", "c", "d", "e"]));
        let twice = update_stops(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_stop_middle_pair() {
        let stops = interleaved(&["a", "b", "c"]);
        let stops = remove_stop(stops, 2);
        assert_eq!(stops.len(), 3);
        assert_eq!(stop_at(&stops, 2).color, "c");
    }

    #[test]
    fn test_remove_stop_last_drops_dangling_hint() {
        let stops = interleaved(&["a", "b", "c"]);
        // Removing the last stop leaves `a, hint, b, hint`; the tail hint goes too
        let stops = remove_stop(stops, 4);
        assert_eq!(stops.len(), 3);
        assert!(stops.last().is_some_and(StopOrHint::is_stop));
    }

    #[test]
    fn test_remove_stop_first_pair() {
        let stops = remove_stop(interleaved(&["a", "b", "c"]), 0);
        assert_eq!(stops.len(), 3);
        assert_eq!(stop_at(&stops, 0).color, "b");
    }
}
