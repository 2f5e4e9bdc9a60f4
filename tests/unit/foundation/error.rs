use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FrameError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FrameError::asset("x").to_string().contains("asset error:"));
    assert!(FrameError::render("x").to_string().contains("render error:"));
    assert!(
        FrameError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FrameError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
