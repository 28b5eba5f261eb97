use fruitboard::viewport::{DesignSize, ViewportFit};

const EPS: f32 = 1e-3;

fn design(w: f32, h: f32) -> DesignSize {
    DesignSize::new(w, h).unwrap()
}

// A spread of design spaces and surfaces: square, wide, tall, tiny, huge.
fn cases() -> Vec<(f32, f32, f32, f32)> {
    let designs = [(9.0, 9.0), (16.0, 9.0), (3.0, 4.0), (1280.0, 720.0), (0.5, 2.0)];
    let screens = [(1920.0, 1080.0), (800.0, 800.0), (600.0, 1024.0), (1.0, 1.0), (3840.0, 2160.0), (333.0, 77.0)];
    let mut out = Vec::new();
    for (dw, dh) in designs {
        for (sw, sh) in screens {
            out.push((dw, dh, sw, sh));
        }
    }
    out
}

#[test]
fn spec_example_square_design_on_full_hd() {
    let fit = ViewportFit::compute(design(9.0, 9.0), 1920.0, 1080.0);
    assert_eq!(fit.scale, 120.0);
    assert_eq!(fit.offset_x, 420.0);
    assert_eq!(fit.offset_y, 0.0);
}

#[test]
fn scaled_design_fits_with_one_axis_flush() {
    for (dw, dh, sw, sh) in cases() {
        let fit = ViewportFit::compute(design(dw, dh), sw, sh);
        let (w, h) = (dw * fit.scale, dh * fit.scale);
        let tol_w = EPS * sw.max(1.0);
        let tol_h = EPS * sh.max(1.0);
        assert!(w <= sw + tol_w, "width overflows ({dw}x{dh} in {sw}x{sh})");
        assert!(h <= sh + tol_h, "height overflows ({dw}x{dh} in {sw}x{sh})");
        assert!(
            (w - sw).abs() <= tol_w || (h - sh).abs() <= tol_h,
            "neither axis flush ({dw}x{dh} in {sw}x{sh}): {w}x{h}"
        );
    }
}

#[test]
fn scaled_design_is_centred() {
    for (dw, dh, sw, sh) in cases() {
        let fit = ViewportFit::compute(design(dw, dh), sw, sh);
        let cx = fit.offset_x + dw * fit.scale / 2.0;
        let cy = fit.offset_y + dh * fit.scale / 2.0;
        assert!((cx - sw / 2.0).abs() <= EPS * sw, "x off-centre ({dw}x{dh} in {sw}x{sh})");
        assert!((cy - sh / 2.0).abs() <= EPS * sh, "y off-centre ({dw}x{dh} in {sw}x{sh})");
    }
}

#[test]
fn offsets_are_never_negative() {
    for (dw, dh, sw, sh) in cases() {
        let fit = ViewportFit::compute(design(dw, dh), sw, sh);
        assert!(fit.offset_x >= -EPS && fit.offset_y >= -EPS, "({dw}x{dh} in {sw}x{sh}) {fit:?}");
    }
}

#[test]
fn refit_is_idempotent() {
    let d = design(16.0, 9.0);
    let a = ViewportFit::compute(d, 1024.0, 768.0);
    let b = ViewportFit::compute(d, 1024.0, 768.0);
    assert_eq!(a, b);
}

#[test]
fn design_corners_map_to_viewport_corners() {
    let d = design(16.0, 9.0);
    let fit = ViewportFit::compute(d, 800.0, 800.0);
    let v = fit.viewport(d);
    assert_eq!(fit.to_screen([0.0, 0.0]), [v.x, v.y]);
    let br = fit.to_screen([16.0, 9.0]);
    assert!((br[0] - (v.x + v.width)).abs() < EPS && (br[1] - (v.y + v.height)).abs() < EPS);
}

#[test]
fn zero_design_dimension_is_a_config_error() {
    assert!(DesignSize::new(0.0, 9.0).is_err());
    assert!(DesignSize::new(9.0, -3.0).is_err());
}
