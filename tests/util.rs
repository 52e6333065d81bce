/// Check whether two floats have a relative difference of at most 5e-9 times the larger magnitude.
#[macro_export]
macro_rules! assert_floats_near_equal {
    ($val1:expr, $val2:expr, $msg:expr) => {{
        let a: f64 = $val1;
        let b: f64 = $val2;
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() / scale < 5e-9, "{}: {} != {}", $msg, a, b);
    }};
}
