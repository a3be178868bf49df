//! Comprehensive tests for gradient-css
//!
//! Parsing edge cases, auto-layout properties and builder round-trips.

use gradient_css::{
    ColorStop, GradientKind, GradientLayer, Hint, ParseError, StopOrHint, StopPosition,
    build_gradient_strings, parse_gradient, update_stops,
};
use proptest::prelude::*;

const VALID: &[&str] = &[
    "conic-gradient(at top right, deeppink, rebeccapurple)",
    "conic-gradient(from 90deg at bottom right, cyan, rebeccapurple)",
    "conic-gradient(deeppink, cyan, rebeccapurple)",
    "conic-gradient(from 90deg at 50% 0%, #111, 50%, #222, #111)",
    "conic-gradient(#1f005c, #003298, #005ac6, #007fdc, #00a2d3, #00c4ae, #00e474, #00ff00, #1f005c, #003298, #005ac6, #007fdc, #00a2d3, #00c4ae, #00e474, #00ff00)",
    "linear-gradient(#e66465, #9198e5)",
    "linear-gradient(25deg, #e66465, #9198e5)",
    "linear-gradient(to right, #e66465, #9198e5)",
    "linear-gradient(in oklab, blue, red)",
    "linear-gradient(in hsl longer hue, blue, red)",
    "linear-gradient(0deg, blue, green 40%, red)",
    "linear-gradient(.25turn, red, 10%, blue)",
    "linear-gradient(45deg, red 0 50%, blue 50% 100%)",
    "radial-gradient(farthest-corner circle at 50% 50% in oklab,oklch(70% 0.5 340), oklch(90% 0.5 200))",
    "radial-gradient(farthest-corner circle at 50% 115% in oklch,oklch(80% .3 34), oklch(90% .3 200))",
    "conic-gradient(from 0deg at 0% 100% in oklab,#fff, 2%, #f00 0%, 8%, #fff 0%, 13%, #f00 0%, 18%, #fff 0%, 21%, #f00 0%, 24%, #fff 0%)",
    "linear-gradient(to right in oklab,#0ff 12%, #111 0% 24%, #ff0 0% 36%, #111 0% 48%, #f0f 0% 60%, #111 0% 72%, #0ff 0%, #111 0% 100%)",
    "radial-gradient(farthest-corner circle at 0% 0% in oklch,oklch(95% .25 160), 26%, oklch(75% .5 180) 0%, 46%, oklch(75% .5 210) 0%, 60%, oklch(75% .5 230) 0%, 82%, oklch(75% .5 260) 0%)",
];

const INVALID: &[&str] = &[
    "linear-gradient(blue red)",
    "linear-gradient(50px circle, blue, red)",
    "linear-gradient(45deg, blue, red",
    "lineart-gradient(45deg, blue, red)",
    "linear-gradient 45deg, blue, red)",
    "linear-gradient(invalidcolor, invalidcolor)",
    "linear-gradient(45deg, blue, oklhk(none none none))",
    "linear-gradient(45deg, #08, red)",
    "linear-gradient(to right at center, red, blue)",
    "linear-gradient(ellipse, red, blue)",
    "linear-gradient(closest-side, red, blue)",
    "linear-gradient(farthest-corner, red, blue)",
];

fn stop(color: &str) -> StopOrHint {
    ColorStop::new(color).into()
}

fn interleave(stops: Vec<StopOrHint>) -> Vec<StopOrHint> {
    let mut out = Vec::new();
    for entry in stops {
        if !out.is_empty() {
            out.push(Hint::unset().into());
        }
        out.push(entry);
    }
    out
}

fn flat(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn test_parse_valid_gradients() {
    for text in VALID {
        let parsed = parse_gradient(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert!(parsed.color_stops().count() >= 2, "{text}");
    }
}

#[test]
fn test_parse_invalid_gradients() {
    for text in INVALID {
        let result = parse_gradient(text);
        assert!(result.is_err(), "{text} should fail, got {result:?}");
    }
}

#[test]
fn test_error_messages() {
    let err = parse_gradient("lineart-gradient(45deg, blue, red)").unwrap_err();
    assert_eq!(err.to_string(), "Unknown gradient function: lineart-gradient");
    assert_eq!(err.index(), None);

    let err = parse_gradient("linear-gradient(45deg, blue, red").unwrap_err();
    assert_eq!(err, ParseError::MissingCloseParen { index: 15 });
    assert_eq!(err.index(), Some(15));
}

#[test]
fn test_no_positions_in_no_positions_out() {
    let parsed = parse_gradient("linear-gradient(red, blue)").unwrap();
    for stop in parsed.color_stops() {
        assert_eq!(stop.position1, None);
        assert_eq!(stop.position2, None);
    }
}

#[test]
fn test_unitless_zero_kept_distinct() {
    let parsed = parse_gradient("linear-gradient(45deg, red 0 50%, blue 50% 100%)").unwrap();
    let stops: Vec<_> = parsed.color_stops().collect();
    assert_eq!(stops[0].color, "red");
    assert_eq!(stops[0].position1, Some(StopPosition::Unitless(0.0)));
    assert_eq!(stops[0].position2, Some(StopPosition::Percent(50.0)));
    assert_eq!(stops[1].color, "blue");
    assert_eq!(stops[1].position1, Some(StopPosition::Percent(50.0)));
    assert_eq!(stops[1].position2, Some(StopPosition::Percent(100.0)));
}

#[test]
fn test_length_units_filtered() {
    let parsed = parse_gradient("linear-gradient(red 10px 20px, blue 30em 40rem)").unwrap();
    for stop in parsed.color_stops() {
        assert_eq!((stop.position1, stop.position2), (None, None));
    }
}

#[test]
fn test_multiple_layers_take_first() {
    let parsed =
        parse_gradient("radial-gradient(circle, red, blue), linear-gradient(green, yellow);").unwrap();
    assert_eq!(parsed.kind(), GradientKind::Radial);
    let colors: Vec<_> = parsed.color_stops().map(|s| s.color.clone()).collect();
    assert_eq!(colors, ["red", "blue"]);
}

#[test]
fn test_defaulting() {
    let two = update_stops(interleave(vec![stop("red"), stop("blue")]));
    assert_eq!(two[0].as_stop().unwrap().position1, Some(StopPosition::Percent(0.0)));
    assert_eq!(two[2].as_stop().unwrap().position1, Some(StopPosition::Percent(100.0)));

    let three = update_stops(interleave(vec![stop("red"), stop("green"), stop("blue")]));
    assert_eq!(three[2].as_stop().unwrap().position1, Some(StopPosition::Percent(50.0)));
}

#[test]
fn test_explicit_preservation() {
    let pinned = ColorStop::new("#000")
        .with_positions(Some(StopPosition::Unitless(0.0)), Some(StopPosition::Unitless(20.0)));
    let mut stops = interleave(vec![stop("#fff"), pinned.into(), stop("#fff")]);
    for _ in 0..3 {
        stops = update_stops(stops);
    }
    let kept = stops[2].as_stop().unwrap();
    assert_eq!(kept.position1, Some(StopPosition::Unitless(0.0)));
    assert_eq!(kept.position2, Some(StopPosition::Unitless(20.0)));
}

#[test]
fn test_authored_end_kept_when_stops_added() {
    let mut layer =
        GradientLayer::from_parsed(parse_gradient("linear-gradient(red, green 10px 50%, blue)").unwrap());
    let mut stops = layer.stops.clone();
    stops.push(Hint::unset().into());
    stops.push(stop("black"));
    layer.set_stops(stops);

    let green = layer.color_stops().nth(1).unwrap();
    assert_eq!(green.position1, Some(StopPosition::Percent(33.0)));
    assert_eq!(green.position2, Some(StopPosition::Percent(50.0)));
    assert!(flat(&build_gradient_strings(&layer).modern).contains("green 50%"));
}

#[test]
fn test_stripes_preset_round_trip() {
    let span = |color: &str, end: f64| -> StopOrHint {
        ColorStop::new(color)
            .with_positions(Some(StopPosition::Percent(0.0)), Some(StopPosition::Percent(end)))
            .into()
    };
    let mut layer = GradientLayer::new(GradientKind::Linear);
    layer.set_stops(interleave(vec![
        stop("#fff"),
        span("#000", 20.0),
        span("#fff", 40.0),
        span("#000", 60.0),
        span("#fff", 80.0),
        span("#000", 100.0),
    ]));
    layer.set_stops(layer.stops.clone());

    let css = build_gradient_strings(&layer);
    let modern = flat(&css.modern);
    assert!(modern.starts_with("linear-gradient( in oklab, #fff, #000 0% 20%"), "{modern}");
    for expected in ["#000 0% 20%", "#fff 0% 40%", "#000 0% 60%", "#fff 0% 80%", "#000 0% 100%"] {
        assert!(modern.contains(expected), "{modern} lacks {expected}");
    }
    // Auto-managed midpoint hints stay invisible
    assert!(!modern.contains("10%"));
    assert!(!modern.contains("90%"));
}

#[test]
fn test_leading_and_trailing_defaults_elided() {
    let layer = GradientLayer::from_parsed(
        parse_gradient("linear-gradient(to right, red, green, blue)").unwrap(),
    );
    let css = build_gradient_strings(&layer);
    assert_eq!(flat(&css.modern), "linear-gradient( to right in oklab, red, green, blue )");
    assert_eq!(css.classic, "linear-gradient(to right, #f00, #008000, #00f)");
}

#[test]
fn test_round_trip_all_valid() {
    for text in VALID {
        let layer = GradientLayer::from_parsed(parse_gradient(text).unwrap());
        let css = build_gradient_strings(&layer);

        for rendered in [&css.modern, &css.classic] {
            let reparsed = parse_gradient(rendered)
                .unwrap_or_else(|e| panic!("{text} rendered as {rendered} failed: {e}"));
            assert_eq!(reparsed.kind(), layer.kind, "{rendered}");
            assert!(reparsed.color_stops().count() >= 2, "{rendered}");
        }
    }
}

#[test]
fn test_round_trip_is_stable() {
    let text = "radial-gradient(ellipse at top left in hsl longer hue, red, 30%, blue 60%, green)";
    let first = build_gradient_strings(&GradientLayer::from_parsed(parse_gradient(text).unwrap()));
    let second =
        build_gradient_strings(&GradientLayer::from_parsed(parse_gradient(&first.modern).unwrap()));
    assert_eq!(first.modern, second.modern);
}

#[test]
fn test_model_serializes() {
    let layer = GradientLayer::from_parsed(parse_gradient("conic-gradient(red, 25%, blue)").unwrap());
    let json = serde_json::to_string(&layer).unwrap();
    assert!(json.contains("\"kind\":\"hint\""));
    let restored: GradientLayer = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, layer);
}

proptest! {
    #[test]
    fn prop_update_stops_idempotent(
        entries in prop::collection::vec((0u8..3, prop::option::of(0u8..=100), prop::option::of(0u8..=100)), 2..10)
    ) {
        let stops: Vec<StopOrHint> = entries
            .into_iter()
            .map(|(form, p1, p2)| {
                let p1 = p1.map(|v| match form {
                    0 => StopPosition::Unitless(f64::from(v)),
                    _ => StopPosition::Percent(f64::from(v)),
                });
                let p2 = p2.map(|v| StopPosition::Percent(f64::from(v)));
                ColorStop::new("red").with_positions(p1, p2).into()
            })
            .collect();

        let once = update_stops(interleave(stops));
        let twice = update_stops(once.clone());
        prop_assert_eq!(once, twice);
    }
}
