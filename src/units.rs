//! Unit conversions between SI model quantities and the IP units used by
//! the governing standard's thresholds and reporting.

/// Square feet per square meter.
const FT2_PER_M2: f64 = 10.763_910_416_709_722;

/// Btu/hr per watt.
const BTU_PER_HR_PER_W: f64 = 3.412_141_633_127_942;

/// Cubic feet per minute per m^3/s.
const CFM_PER_M3_S: f64 = 2_118.880_003_289_315;

/// Converts an area in m^2 to ft^2.
pub fn m2_to_ft2(area_m2: f64) -> f64 {
    area_m2 * FT2_PER_M2
}

/// Converts an area in ft^2 to m^2.
pub fn ft2_to_m2(area_ft2: f64) -> f64 {
    area_ft2 / FT2_PER_M2
}

/// Converts a load density in W/m^2 to Btu/hr*ft^2.
pub fn w_per_m2_to_btu_per_hr_ft2(load_w_per_m2: f64) -> f64 {
    load_w_per_m2 * BTU_PER_HR_PER_W / FT2_PER_M2
}

/// Converts a volumetric flow in m^3/s to cfm (reporting only).
pub fn m3_s_to_cfm(flow_m3_per_s: f64) -> f64 {
    flow_m3_per_s * CFM_PER_M3_S
}

/// Rounds to a number of decimal places.
///
/// Used to stabilize derived damper fractions across runs; the sizing inputs
/// are floating point and repeated solves can otherwise differ in the last
/// few bits.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
