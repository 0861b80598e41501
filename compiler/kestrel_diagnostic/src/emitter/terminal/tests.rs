use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("type mismatch: expected `int`, found `str`")
        .with_label(Span::new(14, 15), "expected `int`")
        .with_secondary_label(Span::new(6, 7), "declared here")
        .with_note("int and str are incompatible")
        .with_suggestion("use `int(x)` to convert")
}

fn render(emitter: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut output = Vec::new();
    emitter(&mut output);
    String::from_utf8(output).unwrap()
}

#[test]
fn test_plain_output_uses_byte_ranges() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Never, true);
        emitter.emit(&sample_diagnostic());
        emitter.flush();
    });
    assert_eq!(
        text,
        "error[E2001]: type mismatch: expected `int`, found `str`\n\
         \x20 --> 14..15: expected `int`\n\
         \x20     6..7: declared here\n\
         \x20 = note: int and str are incompatible\n\
         \x20 = help: use `int(x)` to convert\n\n"
    );
}

#[test]
fn test_source_context_gives_line_and_column() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Never, false)
            .with_source("main.kes", "let x =\n  \"hi\" + 1;\n");
        emitter.emit(&sample_diagnostic());
    });
    assert!(text.contains("--> main.kes:2:7: expected `int`"));
    assert!(text.contains("main.kes:1:7: declared here"));
}

#[test]
fn test_colors() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Always, false);
        emitter.emit(&sample_diagnostic());
    });
    assert!(text.contains("\x1b[1;31merror\x1b[0m"));
    assert!(text.contains("\x1b[1;34mdeclared here\x1b[0m"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_summary() {
    let both = render(|out| {
        TerminalEmitter::with_color_mode(out, ColorMode::Never, false).emit_summary(2, 1);
    });
    assert_eq!(both, "error: aborting due to 2 previous errors; 1 warning emitted\n");

    let warnings = render(|out| {
        TerminalEmitter::with_color_mode(out, ColorMode::Never, false).emit_summary(0, 3);
    });
    assert_eq!(warnings, "warning: 3 warnings emitted\n");

    let nothing = render(|out| {
        TerminalEmitter::with_color_mode(out, ColorMode::Never, false).emit_summary(0, 0);
    });
    assert_eq!(nothing, "");
}

#[test]
fn test_emit_all_appends_summary() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Never, false);
        emitter.emit_all(&[sample_diagnostic()]);
    });
    assert!(text.ends_with("error: aborting due to previous error\n"));
}
