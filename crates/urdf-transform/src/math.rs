use urdf_core::{EulerOrder, Quaternion, Vector3};

pub const GIMBAL_LOCK_THRESHOLD: f64 = 0.9999999;

pub fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = value * factor;
    // Beyond f64 range there are no digits left to drop.
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn euler_to_quaternion([x, y, z]: Vector3, order: EulerOrder) -> Quaternion {
    let (s1, c1) = (x / 2.0).sin_cos();
    let (s2, c2) = (y / 2.0).sin_cos();
    let (s3, c3) = (z / 2.0).sin_cos();

    match order {
        EulerOrder::Xyz => Quaternion::new(
            c1 * c2 * c3 - s1 * s2 * s3,
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * s3 + s1 * s2 * c3,
        ),
        EulerOrder::Zyx => Quaternion::new(
            c1 * c2 * c3 + s1 * s2 * s3,
            s1 * c2 * c3 - c1 * s2 * s3,
            c1 * s2 * c3 + s1 * c2 * s3,
            c1 * c2 * s3 - s1 * s2 * c3,
        ),
    }
}

// Hamilton product: rotate by `b` first, then by `a`.
pub fn quaternion_multiply(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
        a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
    )
}

pub fn quaternion_to_euler(q: Quaternion, order: EulerOrder) -> Vector3 {
    let Quaternion { w, x, y, z } = q;
    let (wx, wy, wz) = (w * x, w * y, w * z);
    let (xx, xy, xz) = (x * x, x * y, x * z);
    let (yy, yz, zz) = (y * y, y * z, z * z);

    match order {
        EulerOrder::Xyz => {
            let sin_pitch = 2.0 * (xz + wy);
            let pitch = clamp(sin_pitch, -1.0, 1.0).asin();
            if sin_pitch.abs() < GIMBAL_LOCK_THRESHOLD {
                [
                    (2.0 * (wx - yz)).atan2(1.0 - 2.0 * (xx + yy)),
                    pitch,
                    (2.0 * (wz - xy)).atan2(1.0 - 2.0 * (yy + zz)),
                ]
            } else {
                [(2.0 * (yz + wx)).atan2(1.0 - 2.0 * (xx + zz)), pitch, 0.0]
            }
        }
        EulerOrder::Zyx => {
            let sin_pitch = 2.0 * (wy - xz);
            let pitch = clamp(sin_pitch, -1.0, 1.0).asin();
            if sin_pitch.abs() < GIMBAL_LOCK_THRESHOLD {
                [
                    (2.0 * (yz + wx)).atan2(1.0 - 2.0 * (xx + yy)),
                    pitch,
                    (2.0 * (xy + wz)).atan2(1.0 - 2.0 * (yy + zz)),
                ]
            } else {
                [0.0, pitch, (2.0 * (wz - xy)).atan2(1.0 - 2.0 * (xx + zz))]
            }
        }
    }
}
