use rgb::FromSlice;
use svg2png::{Error, RenderRequest, Rendered};


/// A 100x50 document with a red rectangle in the top-left 10x10 corner.
const CORNER_RECT: &str = "
<svg xmlns='http://www.w3.org/2000/svg' width='100' height='50'>
    <rect width='10' height='10' fill='#ff0000'/>
</svg>
";

/// A 100x50 document fully covered with blue.
const FULL_RECT: &str = "
<svg xmlns='http://www.w3.org/2000/svg' width='100' height='50'>
    <rect width='100' height='50' fill='#0000ff'/>
</svg>
";

fn options() -> svg2png::Options {
    let mut opt = svg2png::Options::default();
    opt.fonts.skip_system_fonts = true;
    opt
}

pub fn render_with<F>(svg: &[u8], f: F) -> Result<Rendered, Error>
where
    F: FnOnce(&mut RenderRequest),
{
    let mut request = RenderRequest::new(svg.to_vec());
    f(&mut request);
    svg2png::render(&request, &options())
}

fn size_of(svg: &str, f: impl FnOnce(&mut RenderRequest)) -> (u32, u32) {
    let img = render_with(svg.as_bytes(), f).unwrap();
    assert_eq!(img.pixmap.width(), img.resolved.width);
    assert_eq!(img.pixmap.height(), img.resolved.height);
    (img.pixmap.width(), img.pixmap.height())
}

fn invalid_name(r: Result<Rendered, Error>) -> &'static str {
    match r {
        Err(Error::InvalidParameter { name, .. }) => name,
        Err(e) => panic!("expected an invalid parameter error, got {}", e),
        Ok(_) => panic!("expected an invalid parameter error, got an image"),
    }
}

fn pixel(img: &Rendered, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = img.pixmap.pixel(x, y).unwrap().demultiply();
    (c.red(), c.green(), c.blue(), c.alpha())
}

#[test]
fn native_size() {
    assert_eq!(size_of(CORNER_RECT, |_| {}), (100, 50));
}

#[test]
fn scale_2() {
    assert_eq!(size_of(CORNER_RECT, |r| r.scale = Some(2.0)), (200, 100));
}

#[test]
fn scale_overrides_size() {
    let size = size_of(CORNER_RECT, |r| {
        r.scale = Some(0.5);
        r.width = Some(512);
        r.height = Some(512);
    });
    assert_eq!(size, (50, 25));
}

#[test]
fn exact_size() {
    let size = size_of(CORNER_RECT, |r| {
        r.width = Some(512);
        r.height = Some(512);
    });
    assert_eq!(size, (512, 512));
}

#[test]
fn width_keeps_aspect() {
    assert_eq!(size_of(CORNER_RECT, |r| r.width = Some(300)), (300, 150));
}

#[test]
fn height_keeps_aspect() {
    assert_eq!(size_of(CORNER_RECT, |r| r.height = Some(10)), (20, 10));
}

#[test]
fn viewbox_only() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 40 30'/>";
    assert_eq!(size_of(svg, |r| r.width = Some(80)), (80, 60));
}

#[test]
fn dpi_converts_physical_units() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='1in' height='0.5in'/>";
    assert_eq!(size_of(svg, |r| r.dpi = 72), (72, 36));
    assert_eq!(size_of(svg, |r| r.dpi = 300), (300, 150));
}

#[test]
fn dpi_out_of_bounds() {
    let r = render_with(CORNER_RECT.as_bytes(), |r| r.dpi = 71);
    assert_eq!(invalid_name(r), "dpi");

    let r = render_with(CORNER_RECT.as_bytes(), |r| r.dpi = 601);
    assert_eq!(invalid_name(r), "dpi");
}

#[test]
fn dpi_is_checked_before_parsing() {
    let r = render_with(b"not an svg", |r| r.dpi = 1000);
    assert_eq!(invalid_name(r), "dpi");
}

#[test]
fn scale_out_of_bounds() {
    let r = render_with(CORNER_RECT.as_bytes(), |r| r.scale = Some(15.0));
    assert_eq!(invalid_name(r), "scale");
}

#[test]
fn explicit_size_out_of_bounds() {
    let r = render_with(CORNER_RECT.as_bytes(), |r| r.width = Some(10_001));
    assert_eq!(invalid_name(r), "width");

    let r = render_with(CORNER_RECT.as_bytes(), |r| r.height = Some(0));
    assert_eq!(invalid_name(r), "height");
}

#[test]
fn invalid_background() {
    let r = render_with(CORNER_RECT.as_bytes(), |r| r.background = "red".to_string());
    assert_eq!(invalid_name(r), "background");
}

#[test]
fn transparent_background() {
    let img = render_with(CORNER_RECT.as_bytes(), |_| {}).unwrap();
    assert_eq!(pixel(&img, 5, 5), (255, 0, 0, 255));
    assert_eq!(pixel(&img, 50, 25), (0, 0, 0, 0));
}

#[test]
fn color_background() {
    let img = render_with(CORNER_RECT.as_bytes(), |r| {
        r.background = "#00ff00".to_string();
    })
    .unwrap();
    assert_eq!(pixel(&img, 5, 5), (255, 0, 0, 255));
    assert_eq!(pixel(&img, 50, 25), (0, 255, 0, 255));
    assert_eq!(pixel(&img, 99, 49), (0, 255, 0, 255));
}

#[test]
fn scaled_content() {
    let img = render_with(CORNER_RECT.as_bytes(), |r| r.scale = Some(2.0)).unwrap();
    // The 10x10 rect becomes 20x20.
    assert_eq!(pixel(&img, 15, 15), (255, 0, 0, 255));
    assert_eq!(pixel(&img, 25, 25), (0, 0, 0, 0));
}

#[test]
fn stretched_content() {
    let img = render_with(FULL_RECT.as_bytes(), |r| {
        r.width = Some(64);
        r.height = Some(64);
    })
    .unwrap();

    let not_covered = img
        .pixmap
        .data()
        .as_rgba()
        .iter()
        .filter(|c| c.a != 255)
        .count();
    assert_eq!(not_covered, 0);
}

#[test]
fn render_tree_uses_output_size() {
    let tree = svg2png::parse_tree(FULL_RECT.as_bytes(), 96, &options()).unwrap();
    // The sizing mode disagrees with the size on purpose.
    let resolved = svg2png::Resolved {
        width: 64,
        height: 64,
        dpi: 96,
        background: svg2png::Background::Transparent,
        fit_to: svg2png::FitTo::Original,
    };

    let img = svg2png::render_tree(&tree, resolved).unwrap();
    assert_eq!((img.pixmap.width(), img.pixmap.height()), (64, 64));
    assert_eq!(pixel(&img, 63, 63), (0, 0, 255, 255));
}

#[test]
fn svgz() {
    use std::io::Write;

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(CORNER_RECT.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let img = render_with(&data, |r| r.scale = Some(2.0)).unwrap();
    assert_eq!((img.pixmap.width(), img.pixmap.height()), (200, 100));
    assert_eq!(pixel(&img, 15, 15), (255, 0, 0, 255));
}

#[test]
fn malformed_svgz() {
    let r = render_with(&[0x1f, 0x8b, 0x00, 0x01], |_| {});
    assert!(matches!(
        r,
        Err(Error::RenderFailure(usvg::Error::MalformedGZip))
    ));
}

#[test]
fn malformed_xml() {
    let r = render_with(b"<svg xmlns='http://www.w3.org/2000/svg'", |_| {});
    assert!(matches!(
        r,
        Err(Error::RenderFailure(usvg::Error::ParsingFailed(_)))
    ));
}

#[test]
fn not_utf8() {
    let r = render_with(&[0xff, 0xfe, 0x00, 0x3c], |_| {});
    assert!(matches!(
        r,
        Err(Error::RenderFailure(usvg::Error::NotAnUtf8Str))
    ));
}

#[test]
fn error_messages() {
    let r = render_with(CORNER_RECT.as_bytes(), |r| r.scale = Some(15.0));
    assert_eq!(r.unwrap_err().to_string(), "invalid scale: 15 is not in 0.1..=10");
}
