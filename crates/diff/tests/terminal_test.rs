//! Terminal encoding detection rules.

use requisite_diff::prelude::*;
use requisite_diff::terminal::{encoding_for_term, encoding_for_windows_build, encoding_for_windows_version};
use rstest::rstest;

#[rstest]
#[case::unset(None, None, TerminalEncoding::None)]
#[case::dumb(Some("dumb"), None, TerminalEncoding::None)]
#[case::xterm(Some("xterm"), None, TerminalEncoding::Xterm8Color)]
#[case::xterm_16(Some("xterm-16color"), None, TerminalEncoding::Xterm16Color)]
#[case::xterm_256(Some("xterm-256color"), None, TerminalEncoding::Xterm256Color)]
#[case::colorterm(Some("xterm-256color"), Some("truecolor"), TerminalEncoding::Rgb888Color)]
#[case::direct(Some("xterm-24bit"), None, TerminalEncoding::Rgb888Color)]
#[case::bare_truecolor(Some("truecolor"), None, TerminalEncoding::Rgb888Color)]
#[case::truecolor_infix(Some("xterm-truecolor-italic"), None, TerminalEncoding::Rgb888Color)]
#[case::unknown(Some("vt52"), None, TerminalEncoding::None)]
fn term_variable(
    #[case] term: Option<&str>,
    #[case] colorterm: Option<&str>,
    #[case] expected: TerminalEncoding,
) {
    assert_eq!(encoding_for_term(term, colorterm), expected);
}

#[rstest]
#[case::undetectable(None, TerminalEncoding::None)]
#[case::legacy(Some(9_200), TerminalEncoding::None)]
#[case::threshold_16(Some(10_586), TerminalEncoding::Xterm16Color)]
#[case::below_rgb(Some(14_930), TerminalEncoding::Xterm16Color)]
#[case::threshold_rgb(Some(14_931), TerminalEncoding::Rgb888Color)]
#[case::current(Some(22_631), TerminalEncoding::Rgb888Color)]
fn windows_build(#[case] build: Option<u32>, #[case] expected: TerminalEncoding) {
    assert_eq!(encoding_for_windows_build(build), expected);
}

#[rstest]
#[case::missing(None, TerminalEncoding::None)]
#[case::unparsable(Some("unknown"), TerminalEncoding::None)]
#[case::win10(Some("10.0.19045"), TerminalEncoding::Rgb888Color)]
#[case::early_win10(Some("10.0.10586"), TerminalEncoding::Xterm16Color)]
fn windows_version(#[case] version: Option<&str>, #[case] expected: TerminalEncoding) {
    assert_eq!(encoding_for_windows_version(version), expected);
}

#[test]
fn encodings_serialize_by_name() {
    let json = serde_json::to_string(&TerminalEncoding::Xterm256Color).unwrap();
    assert_eq!(json, "\"xterm-256color\"");

    let parsed: TerminalEncoding = serde_json::from_str("\"rgb-888color\"").unwrap();
    assert_eq!(parsed, TerminalEncoding::Rgb888Color);
}

#[test]
fn supported_encodings_include_detected() {
    let supported = GlobalConfiguration::supported_terminal_encodings();
    assert_eq!(supported.first(), Some(&TerminalEncoding::None));
    assert!(supported.contains(&GlobalConfiguration::detected_terminal_encoding()));
}
