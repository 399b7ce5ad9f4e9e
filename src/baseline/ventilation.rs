//! Multizone ventilation-effectiveness damper solve.
//!
//! Implements the multizone outdoor-air procedure for variable-air-volume
//! systems: every zone's ventilation effectiveness Evz must meet a floor
//! (default 0.6), achieved by raising the zone's minimum damper fraction;
//! the system design outdoor-air intake is then the uncorrected sum divided
//! by the worst surviving effectiveness. Single-zone and constant-volume
//! systems bypass this solve.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ruleset::RuleSet;
use crate::error::{Error, Result};
use crate::name::SortByName;
use crate::units::{m3_s_to_cfm, round_to_decimals};
use crate::zone::Zone;

/// Per-zone outcome of the damper solve.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneVentilation {
    pub zone_name: String,
    /// Evz after any adjustment.
    pub ventilation_effectiveness: f64,
    /// Final minimum damper fraction in effect for the zone.
    pub min_damper_fraction: f64,
    /// True when the solve raised the zone's stored damper fraction.
    pub adjusted: bool,
}

/// System-level outcome of the damper solve.
#[derive(Debug, Clone, Serialize)]
pub struct DamperSolveResult {
    pub zones: Vec<ZoneVentilation>,
    /// Minimum Evz across the zones, after adjustment.
    pub system_ventilation_effectiveness: f64,
    /// Hard-sized design outdoor-air intake Vot in m^3/s.
    pub system_outdoor_air_m3_per_s: f64,
    /// Zones whose stored damper fraction was raised to meet the
    /// effectiveness floor.
    pub num_zones_adjusted: usize,
}

/// Runs the multizone ventilation procedure over a system's primary zones,
/// raising `min_damper_fraction` where the effectiveness floor demands it.
///
/// Re-running on unchanged inputs is a fixed point: damper fractions are
/// already at their targets, so nothing is adjusted the second time.
pub fn solve_dampers(
    zones: &mut [Zone],
    system_design_airflow_m3_per_s: f64,
    rules: &RuleSet,
) -> Result<DamperSolveResult> {
    if zones.is_empty() {
        return Err(Error::degenerate("damper solve received no primary zones"));
    }
    if system_design_airflow_m3_per_s <= 0.0 {
        return Err(Error::degenerate(
            "damper solve received a non-positive system design airflow",
        ));
    }
    zones.sort_by_name();

    // Total uncorrected outdoor airflow rate.
    let v_ou: f64 = zones
        .iter()
        .map(|z| z.breathing_zone_outdoor_air_m3_per_s * z.multiplier as f64)
        .sum();
    let v_ps = system_design_airflow_m3_per_s;

    // Average outdoor air fraction.
    let x_s = v_ou / v_ps;
    debug!(
        "v_ou = {:.0} cfm, v_ps = {:.0} cfm, x_s = {:.2}",
        m3_s_to_cfm(v_ou),
        m3_s_to_cfm(v_ps),
        x_s
    );

    let floor = rules.ventilation_effectiveness_floor;
    let mut results: Vec<ZoneVentilation> = Vec::new();
    let mut e_vzs: Vec<f64> = Vec::new();
    let mut e_vzs_adj: Vec<f64> = Vec::new();
    let mut terminal_max_sum = 0.0;
    let mut num_zones_adjusted = 0;

    for zone in zones.iter_mut() {
        // Primary design airflow: max of heating and cooling design rates.
        let v_pz = match zone.peak_design_airflow_m3_per_s() {
            Some(v) if v > 0.0 => v,
            _ => {
                warn!(
                    "Zone {} has no design airflow from the sizing pass; it is \
                     excluded from the ventilation solve",
                    zone.name
                );
                continue;
            }
        };
        terminal_max_sum += v_pz * zone.multiplier as f64;

        let v_bz = zone.breathing_zone_outdoor_air_m3_per_s;
        let e_z = zone.air_distribution_effectiveness;
        let v_oz = v_bz / e_z;

        // Effective minimum damper fraction: the terminal setting, raised to
        // the fixed-minimum-flow ratio when that governs.
        let mdp_term = zone.min_damper_fraction;
        let min_zn_flow = zone.fixed_min_airflow_m3_per_s;
        let mdp = if min_zn_flow > 0.0 {
            round_to_decimals(mdp_term.max(min_zn_flow / v_pz), 2)
        } else {
            mdp_term
        };

        // Zone minimum discharge airflow and discharge outdoor-air fraction.
        let v_dz = v_pz * mdp;
        let z_d = if v_oz <= 0.0 {
            0.0
        } else if v_dz > 0.0 {
            v_oz / v_dz
        } else {
            f64::INFINITY
        };

        // Zone ventilation effectiveness.
        let e_vz = 1.0 + x_s - z_d;
        e_vzs.push(e_vz);
        debug!(
            "Zone {}: v_oz = {:.2} m^3/s, v_pz = {:.2} m^3/s, v_dz = {:.2}, z_d = {:.2}",
            zone.name, v_oz, v_pz, v_dz, z_d
        );

        if e_vz < floor {
            // Raise the damper until the floor is met exactly.
            let z_d_adj = 1.0 + x_s - floor;
            let v_dz_adj = v_oz / z_d_adj;
            let mut mdp_adj = (v_dz_adj / v_pz).min(1.0);
            // Stabilize the last few bits so repeated solves agree.
            mdp_adj = round_to_decimals(mdp_adj, rules.damper_rounding_decimals);
            let e_vz_adj = 1.0 + x_s - z_d_adj;
            e_vzs_adj.push(e_vz_adj);

            let adjusted = mdp_adj > zone.min_damper_fraction;
            if adjusted {
                info!(
                    "Zone {} has a ventilation effectiveness of {:.2}; increasing \
                     to {:.2} by raising the minimum damper position from {:.2} \
                     to {:.2}",
                    zone.name, e_vz, e_vz_adj, mdp, mdp_adj
                );
                zone.min_damper_fraction = mdp_adj;
                num_zones_adjusted += 1;
            }
            results.push(ZoneVentilation {
                zone_name: zone.name.clone(),
                ventilation_effectiveness: e_vz_adj,
                min_damper_fraction: zone.min_damper_fraction,
                adjusted,
            });
        } else {
            e_vzs_adj.push(e_vz);
            results.push(ZoneVentilation {
                zone_name: zone.name.clone(),
                ventilation_effectiveness: e_vz,
                min_damper_fraction: mdp.max(zone.min_damper_fraction),
                adjusted: false,
            });
        }
    }

    if e_vzs_adj.is_empty() {
        return Err(Error::degenerate(
            "no primary zone carried design airflow data for the ventilation solve",
        ));
    }

    // System ventilation effectiveness before and after adjustment, and the
    // corresponding outdoor intake flows.
    let e_v = e_vzs.iter().copied().fold(f64::INFINITY, f64::min);
    let e_v_adj = e_vzs_adj.iter().copied().fold(f64::INFINITY, f64::min);
    let v_ot = v_ou / e_v;
    let v_ot_adj = v_ou / e_v_adj;

    if num_zones_adjusted > 0 {
        info!(
            "Multizone outdoor air: simple summation gives {:.0} cfm; the \
             multizone method gives {:.0} cfm at a system ventilation \
             effectiveness of {:.2}. After raising the minimum damper position \
             in {} critical zones, the requirement is {:.0} cfm at an \
             effectiveness of {:.2}",
            m3_s_to_cfm(v_ou),
            m3_s_to_cfm(v_ot),
            e_v,
            num_zones_adjusted,
            m3_s_to_cfm(v_ot_adj),
            e_v_adj
        );
    } else {
        info!(
            "Multizone outdoor air: simple summation gives {:.0} cfm; the \
             multizone method requires {:.0} cfm at a system ventilation \
             effectiveness of {:.2}",
            m3_s_to_cfm(v_ou),
            m3_s_to_cfm(v_ot_adj),
            e_v_adj
        );
    }

    // When the required intake exceeds what the terminals can pass at
    // maximum flow, every damper floor rises to compensate.
    if v_ot_adj > terminal_max_sum && terminal_max_sum > 0.0 {
        let mdp_floor = (v_ot_adj / terminal_max_sum).min(1.0);
        info!(
            "Design outdoor air of {:.0} cfm exceeds the terminal maximum sum of \
             {:.0} cfm; flooring every minimum damper position at {:.2}",
            m3_s_to_cfm(v_ot_adj),
            m3_s_to_cfm(terminal_max_sum),
            mdp_floor
        );
        for zone in zones.iter_mut() {
            if zone.min_damper_fraction < mdp_floor {
                zone.min_damper_fraction = mdp_floor;
            }
        }
        for entry in &mut results {
            if entry.min_damper_fraction < mdp_floor {
                entry.min_damper_fraction = mdp_floor;
            }
        }
    }

    Ok(DamperSolveResult {
        zones: results,
        system_ventilation_effectiveness: e_v_adj,
        system_outdoor_air_m3_per_s: v_ot_adj,
        num_zones_adjusted,
    })
}
