use matlabel_layout::{
    FontFace, HostPaper, HostSetup, LabelContent, LabelGeometry, LabelLayout, ScaleMode,
    StandardMetrics, TextMeasurer, Typography, fit_to_host, wrap_text,
};
use proptest::prelude::*;

fn engine() -> LabelLayout {
    LabelLayout::new(LabelGeometry::default(), Typography::default())
        .unwrap_or_else(|err| panic!("default layout rejected: {err}"))
}

fn paper_strategy() -> impl Strategy<Value = HostPaper> {
    prop_oneof![Just(HostPaper::Letter), Just(HostPaper::A4)]
}

fn scale_strategy() -> impl Strategy<Value = ScaleMode> {
    prop_oneof![Just(ScaleMode::Fit), Just(ScaleMode::NoScale)]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn short_codes_always_fit_the_code_line(code in "[A-Z0-9]{1,9}") {
        let layout = engine();
        let plan = layout.plan(&LabelContent::new(code.clone(), ""));
        let width = StandardMetrics.text_width(&code, FontFace::TimesBold, f32::from(plan.code.run.size));
        prop_assert!(width <= layout.geometry().code_width());
        prop_assert!(plan.code.run.size >= 28);
        prop_assert!(plan.code.run.size <= 220);
    }

    #[test]
    fn codes_with_latin1_letters_fit_the_code_line(
        code in "[A-Z0-9\u{C0}\u{C6}\u{D6}\u{DC}\u{D8}]{1,9}",
    ) {
        let layout = engine();
        let plan = layout.plan(&LabelContent::new(code.clone(), ""));
        let width = StandardMetrics.text_width(&code, FontFace::TimesBold, f32::from(plan.code.run.size));
        prop_assert!(width <= layout.geometry().code_width());
    }

    #[test]
    fn description_fits_or_sits_at_the_floor(description in "[a-zA-Z ,\n]{0,400}") {
        let layout = engine();
        let plan = layout.plan(&LabelContent::new("PP1", description));
        let block = &plan.description;
        if block.fit.overflow {
            prop_assert_eq!(block.fit.size, 28);
            prop_assert!(block.fit.total_height() > block.band);
        } else {
            prop_assert!(block.fit.total_height() <= block.band + 1e-3);
        }
        prop_assert_eq!(block.runs.len(), block.fit.lines.len());
    }

    #[test]
    fn chosen_orientation_has_the_larger_footprint(
        width in 10.0f32..1000.0,
        height in 10.0f32..1000.0,
        paper in paper_strategy(),
        scale in scale_strategy(),
    ) {
        let setup = HostSetup { paper, scale, ..HostSetup::default() };
        let fit = fit_to_host(width, height, &setup);
        let chosen = fit.chosen();
        prop_assert!(chosen.area() >= fit.upright.area());
        prop_assert!(chosen.area() >= fit.rotated.area());
    }

    #[test]
    fn fit_mode_stays_inside_the_printable_area(
        width in 10.0f32..2000.0,
        height in 10.0f32..2000.0,
        paper in paper_strategy(),
    ) {
        let setup = HostSetup { paper, ..HostSetup::default() };
        let fit = fit_to_host(width, height, &setup);
        let placement = fit.chosen();
        prop_assert!(placement.offset_x >= setup.margin - 1e-2);
        prop_assert!(placement.offset_y >= setup.margin - 1e-2);
        prop_assert!(placement.offset_x + placement.width <= fit.page_width - setup.margin + 1e-2);
        prop_assert!(placement.offset_y + placement.height <= fit.page_height - setup.margin + 1e-2);
    }

    #[test]
    fn wrapping_preserves_word_order(
        text in "[a-z]{1,12}( [a-z]{1,12}){0,30}",
        size in 8.0f32..60.0,
    ) {
        let lines = wrap_text(&StandardMetrics, &text, FontFace::TimesRoman, size, 252.0);
        let rejoined: Vec<&str> = lines.iter().flat_map(|line| line.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        prop_assert_eq!(rejoined, original);
    }
}

#[test]
fn wide_ligature_codes_shrink_to_their_real_width() {
    let layout = engine();
    let code = "\u{C6}".repeat(5);
    let plan = layout.plan(&LabelContent::new(code.clone(), ""));
    let size = f32::from(plan.code.run.size);
    let width = StandardMetrics.text_width(&code, FontFace::TimesBold, size);
    assert!(width <= layout.geometry().code_width());
    assert!(plan.code.run.size < 100);
}
