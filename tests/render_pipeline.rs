use fillbar::{
    BarConfig, BarStyle, Canvas, Color, DrawCommand, FaultKind, Orientation, PassOutcome,
    Primitive, ProgressBar, Rect, RecordingSurface, TextStyle,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const FONT: &[u8] = include_bytes!("fonts/Cantarell-Regular.ttf");

fn bar_with(style: BarStyle) -> ProgressBar {
    ProgressBar::new(BarConfig::builder().style(style).build())
}

fn draw(bar: &mut ProgressBar, width: i32, height: i32) -> (PassOutcome, Vec<DrawCommand>) {
    let mut surface = RecordingSurface::new();
    let outcome = bar.render(&mut surface, width, height);
    (outcome, surface.take_commands())
}

fn texts(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_overflowing_value_is_clamped_and_notified() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut bar = ProgressBar::default();
    bar.on_value_changed(move |v| sink.borrow_mut().push(v));

    assert_eq!(bar.set_value(150), 100);
    assert_eq!(bar.value(), 100);
    assert_eq!(*seen.borrow(), vec![100]);
}

#[test]
fn test_half_value_fills_half_the_width() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::None).build());
    bar.set_value(50);
    let (outcome, commands) = draw(&mut bar, 400, 23);

    assert_eq!(outcome, PassOutcome::Drawn(2));
    assert_eq!(
        commands[0],
        DrawCommand::FillRect {
            rect: Rect::new(0, 0, 200, 23),
            color: Color::new(217, 201, 194),
        }
    );
    assert_eq!(
        commands[1],
        DrawCommand::StrokeRect {
            rect: Rect::new(0, 0, 400, 23),
            thickness: 2,
            color: Color::BLACK,
        }
    );
}

#[test]
fn test_percentage_text() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::Percentage).build());
    bar.set_value(25);
    let (_, commands) = draw(&mut bar, 400, 23);
    assert_eq!(texts(&commands), vec!["25%"]);
}

#[test]
fn test_label_with_value_over_maximum() {
    let mut bar = bar_with(
        BarStyle::builder()
            .text_style(TextStyle::TextAndValueOverMaximum)
            .label("Load")
            .build(),
    );
    bar.set_maximum(10);
    bar.set_value(3);
    let (_, commands) = draw(&mut bar, 400, 23);
    assert_eq!(texts(&commands), vec!["Load: 3/10"]);
}

#[test]
fn test_zero_maximum_skips_fill_and_percentage_without_fault() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::Percentage).build());
    bar.set_value(40);
    bar.set_maximum(0);
    assert_eq!(bar.value(), 40);

    let (outcome, commands) = draw(&mut bar, 400, 23);
    let primitives: Vec<_> = commands.iter().map(DrawCommand::primitive).collect();
    assert_eq!(outcome, PassOutcome::Drawn(1));
    assert_eq!(primitives, vec![Primitive::Border]);
    assert!(!bar.has_fault());
}

#[test]
fn test_vertical_fill_on_bar() {
    let mut bar = bar_with(
        BarStyle::builder()
            .orientation(Orientation::Vertical)
            .text_style(TextStyle::None)
            .border_thickness(0)
            .build(),
    );
    bar.set_value(75);
    let (_, commands) = draw(&mut bar, 20, 100);
    assert_eq!(
        commands,
        vec![DrawCommand::FillRect {
            rect: Rect::new(0, 25, 20, 75),
            color: Color::new(217, 201, 194),
        }]
    );
}

#[test]
fn test_missing_font_records_fault_and_clear_resets_it() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::Value).build());
    bar.set_value(50);

    let mut frame = vec![0u8; 40 * 10 * 4];
    let mut canvas = Canvas::new(&mut frame, 40, 10);
    assert_eq!(bar.render(&mut canvas, 40, 10), PassOutcome::Faulted);
    // The fill was drawn before the text failed; the border never was.
    assert_eq!(canvas.pixel(0, 5), Some([217, 201, 194, 0xff]));
    assert_eq!(canvas.pixel(39, 5), Some([0, 0, 0, 0]));

    assert!(bar.has_fault());
    assert_eq!(bar.faults()[0].kind, FaultKind::Font);
    assert_eq!(
        bar.fault_log(),
        "Error in text\n Message: no font data supplied\nType: FontError\n"
    );

    let style_before = bar.style().clone();
    let value_before = bar.snapshot();
    bar.take_redraw_request();
    bar.clear_errors();
    assert!(!bar.has_fault());
    assert_eq!(bar.fault_log(), "");
    assert_eq!(bar.style(), &style_before);
    assert_eq!(bar.snapshot(), value_before);
    assert!(!bar.needs_redraw());
}

#[test]
fn test_bar_with_font_draws_every_primitive_on_canvas() {
    let mut bar = bar_with(
        BarStyle::builder()
            .text_style(TextStyle::TextAndPercentage)
            .label("Load")
            .build(),
    );
    bar.set_value(50);

    let mut frame = vec![0u8; 160 * 24 * 4];
    let mut canvas = Canvas::new(&mut frame, 160, 24).with_font(Some(FONT));
    canvas.clear(bar.style().background_color);
    assert_eq!(bar.render(&mut canvas, 160, 24), PassOutcome::Drawn(3));
    assert!(!bar.has_fault());

    // Border on the edge, empty track right of the fill.
    assert_eq!(canvas.pixel(0, 12), Some([0, 0, 0, 0xff]));
    assert_eq!(canvas.pixel(150, 12), Some([251, 56, 33, 0xff]));
    // "Load: 50%" is centred across the fill boundary in white.
    let white_text = (2..158)
        .flat_map(|x| (2..22).map(move |y| (x, y)))
        .filter_map(|(x, y)| canvas.pixel(x, y))
        .any(|px| px[0] > 240 && px[1] > 240 && px[2] > 240);
    assert!(white_text);
}

#[test]
fn test_faults_accumulate_across_passes() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::Value).build());
    let mut surface = RecordingSurface::failing_on(Primitive::Border);
    bar.render(&mut surface, 100, 10);
    bar.render(&mut surface, 100, 10);
    assert_eq!(bar.faults().len(), 2);
    assert!(bar.fault_log().matches("Error in border").count() == 2);
}

#[test]
fn test_next_pass_starts_fresh_after_fault() {
    let mut bar = bar_with(BarStyle::builder().text_style(TextStyle::Value).build());
    bar.set_value(10);
    let mut failing = RecordingSurface::failing_on(Primitive::Fill);
    assert_eq!(bar.render(&mut failing, 100, 10), PassOutcome::Faulted);

    let (outcome, _) = draw(&mut bar, 100, 10);
    assert_eq!(outcome, PassOutcome::Drawn(3));
}

proptest! {
    #[test]
    fn prop_one_notification_per_set(values in proptest::collection::vec(any::<i32>(), 0..40)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bar = ProgressBar::default();
        bar.on_value_changed(move |v| sink.borrow_mut().push(v));

        let stored: Vec<i32> = values.iter().map(|v| bar.set_value(*v)).collect();
        prop_assert_eq!(&*seen.borrow(), &stored);
        prop_assert!(stored.iter().all(|v| (0..=100).contains(v)));
    }

    #[test]
    fn prop_empty_surface_draws_nothing(
        width in -50i32..=0,
        height in -50i32..400,
        value in 0i32..=100,
    ) {
        let mut bar = ProgressBar::default();
        bar.set_value(value);
        let (outcome, commands) = draw(&mut bar, width, height);
        let (outcome_t, commands_t) = draw(&mut bar, height, width);
        prop_assert_eq!(outcome, PassOutcome::Skipped);
        prop_assert_eq!(outcome_t, PassOutcome::Skipped);
        prop_assert!(commands.is_empty() && commands_t.is_empty());
        prop_assert!(!bar.has_fault());
    }

    #[test]
    fn prop_hidden_text_and_border_issue_nothing(value in 1i32..=100, style_index in 0usize..7) {
        let styles = [
            TextStyle::None,
            TextStyle::Value,
            TextStyle::ValueOverMaximum,
            TextStyle::Percentage,
            TextStyle::Text,
            TextStyle::TextAndPercentage,
            TextStyle::TextAndValueOverMaximum,
        ];
        let mut bar = bar_with(
            BarStyle::builder()
                .text_style(styles[style_index])
                .text_color(Color::rgba(255, 255, 255, 0))
                .border_color(Color::TRANSPARENT)
                .label("Load")
                .build(),
        );
        bar.set_value(value);
        let (_, commands) = draw(&mut bar, 400, 23);
        let primitives: Vec<_> = commands.iter().map(DrawCommand::primitive).collect();
        prop_assert_eq!(primitives, vec![Primitive::Fill]);
    }
}
