//! Property tests over the shipped rate tables and generated valid ones.

use proptest::option;
use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use takehome_core::{
    EarnerKind, FiscalYearVariant, GstTreatment, IncomeSolver, RateConfiguration, TaxModel,
};

/// Converts basis points to a rate.
fn bp(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 4)
}

fn earner(consultant: bool) -> EarnerKind {
    if consultant {
        EarnerKind::Consultant
    } else {
        EarnerKind::Employee
    }
}

fn take_home(
    config: &RateConfiguration,
    gross: u64,
    earner: EarnerKind,
) -> Decimal {
    TaxModel::new(config)
        .assess(Decimal::from(gross), earner)
        .unwrap()
        .take_home
}

/// Builds a valid configuration from generated parts.
///
/// Slab rates are the running sum of `rate_steps`, capped so the combined
/// marginal rate stays well below one. The PF cap sits at the surcharge
/// threshold.
#[allow(clippy::too_many_arguments)]
fn build_config(
    first_boundary: u32,
    boundary_gaps: (u32, u32),
    rate_steps: (u32, u32, u32, u32),
    cess_bp: u32,
    surcharge: (u32, u32, u32),
    levies: (u32, bool, u32),
    consultant_rates: (u32, u32, bool),
    pf_bp: u32,
    period: u32,
    rebate_limit: Option<u32>,
) -> RateConfiguration {
    let b1 = Decimal::from(first_boundary);
    let b2 = b1 + Decimal::from(boundary_gaps.0);
    let b3 = b2 + Decimal::from(boundary_gaps.1);

    let (s0, s1, s2, s3) = rate_steps;
    let r0 = bp(s0);
    let r1 = r0 + bp(s1);
    let r2 = r1 + bp(s2);
    let r3 = r2 + bp(s3);

    let (surcharge_bp, threshold, ceiling_gap) = surcharge;
    let threshold = Decimal::from(threshold);
    let (professional_tax, professional_tax_deductible, employee_deduction) = levies;
    let (presumptive_bp, gst_bp, gst_after_presumptive) = consultant_rates;

    RateConfiguration {
        slab_boundaries: vec![b1, b2, b3],
        slab_rates: vec![r0, r1, r2, r3],
        cess_rate: bp(cess_bp),
        surcharge_threshold: threshold,
        surcharge_rate: bp(surcharge_bp),
        surcharge_ceiling: threshold + Decimal::from(ceiling_gap),
        rebate_limit: rebate_limit.map(Decimal::from),
        professional_tax: Decimal::from(professional_tax),
        professional_tax_deductible,
        presumptive_rate: bp(presumptive_bp),
        gst_rate: bp(gst_bp),
        gst_treatment: if gst_after_presumptive {
            GstTreatment::ExcludedAfterPresumptive
        } else {
            GstTreatment::ExcludedBeforePresumptive
        },
        employee_deduction: Decimal::from(employee_deduction),
        pf_rate: bp(pf_bp),
        pf_cap: threshold,
        period,
    }
}

// =============================================================================
// shipped rate tables
// =============================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_take_home_never_falls_as_gross_rises_for_presets(
        variant_index in 0usize..3,
        consultant in any::<bool>(),
        gross in 0u64..14_000,
        step in 1u64..400,
    ) {
        let config = FiscalYearVariant::ALL[variant_index].rate_configuration();
        let earner = earner(consultant);

        prop_assert!(take_home(&config, gross, earner) <= take_home(&config, gross + step, earner));
    }

    #[test]
    fn prop_take_home_never_falls_around_rebate_limit(
        with_gst in any::<bool>(),
        consultant in any::<bool>(),
        gross in 400u64..1_200,
        step in 1u64..4,
    ) {
        let variant = if with_gst {
            FiscalYearVariant::Fy2018_19Gst
        } else {
            FiscalYearVariant::Fy2018_19
        };
        let config = variant.rate_configuration();
        let earner = earner(consultant);

        prop_assert!(take_home(&config, gross, earner) <= take_home(&config, gross + step, earner));
    }

    #[test]
    fn prop_marginal_take_home_never_falls_in_rupees(
        consultant in any::<bool>(),
        gross in 0u64..2_000_000,
        step in 1u64..50,
    ) {
        let config = FiscalYearVariant::Fy2021_22Marginal.rate_configuration();
        let earner = earner(consultant);

        prop_assert!(take_home(&config, gross, earner) <= take_home(&config, gross + step, earner));
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_solved_gross_is_minimal_for_presets(
        variant_index in 0usize..3,
        consultant in any::<bool>(),
        target in 1u32..900,
    ) {
        let config = FiscalYearVariant::ALL[variant_index].rate_configuration();
        let earner = earner(consultant);
        let target = Decimal::from(target);

        let gross = IncomeSolver::new(&config).gross_income_for(target, earner).unwrap();
        let gross = u64::try_from(gross).unwrap();

        prop_assert!(take_home(&config, gross, earner) >= target);
        if gross > 0 {
            prop_assert!(take_home(&config, gross - 1, earner) < target);
        }
    }

    #[test]
    fn prop_solved_gross_is_minimal_around_rebate_limit(
        consultant in any::<bool>(),
        target in 30u32..100,
    ) {
        let config = FiscalYearVariant::Fy2018_19.rate_configuration();
        let earner = earner(consultant);
        let target = Decimal::from(target);

        let gross = IncomeSolver::new(&config).gross_income_for(target, earner).unwrap();
        let gross = u64::try_from(gross).unwrap();

        prop_assert!(take_home(&config, gross, earner) >= target);
        prop_assert!(take_home(&config, gross - 1, earner) < target);
    }

    #[test]
    fn prop_solving_own_take_home_never_asks_for_more(
        variant_index in 0usize..3,
        consultant in any::<bool>(),
        gross in 0u64..20_000,
    ) {
        let config = FiscalYearVariant::ALL[variant_index].rate_configuration();
        let earner = earner(consultant);
        let net = take_home(&config, gross, earner);

        let solved = IncomeSolver::new(&config).gross_income_for(net, earner).unwrap();

        prop_assert!(solved <= Decimal::from(gross));
        prop_assert!(take_home(&config, u64::try_from(solved).unwrap(), earner) >= net);
    }
}

// =============================================================================
// generated rate tables
// =============================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(96))]

    #[test]
    fn prop_generated_tables_validate_and_stay_monotone(
        first_boundary in 0u32..1_000,
        boundary_gaps in (1u32..2_000, 1u32..2_000),
        rate_steps in (0u32..1_125, 0u32..1_125, 0u32..1_125, 0u32..1_125),
        cess_bp in 0u32..500,
        surcharge in (0u32..2_500, 1_000u32..20_000, 0u32..10_000),
        levies in (0u32..100, any::<bool>(), 0u32..500),
        consultant_rates in (1_000u32..=10_000, 0u32..2_800, any::<bool>()),
        pf_bp in 0u32..2_500,
        period in 1u32..13,
        rebate_limit in option::of(0u32..3_000),
        consultant in any::<bool>(),
        gross in 0u64..40_000,
        step in 1u64..2_000,
    ) {
        let config = build_config(
            first_boundary,
            boundary_gaps,
            rate_steps,
            cess_bp,
            surcharge,
            levies,
            consultant_rates,
            pf_bp,
            period,
            rebate_limit,
        );
        prop_assert_eq!(config.validate(), Ok(()));

        let earner = earner(consultant);
        prop_assert!(take_home(&config, gross, earner) <= take_home(&config, gross + step, earner));
    }

    #[test]
    fn prop_generated_tables_solve_to_minimal_gross(
        first_boundary in 0u32..1_000,
        boundary_gaps in (1u32..2_000, 1u32..2_000),
        rate_steps in (0u32..1_125, 0u32..1_125, 0u32..1_125, 0u32..1_125),
        cess_bp in 0u32..500,
        surcharge in (0u32..2_500, 1_000u32..20_000, 0u32..10_000),
        levies in (0u32..100, any::<bool>(), 0u32..500),
        consultant_rates in (1_000u32..=10_000, 0u32..2_800, any::<bool>()),
        pf_bp in 0u32..2_500,
        period in 1u32..13,
        rebate_limit in option::of(0u32..3_000),
        consultant in any::<bool>(),
        target in 1u32..3_000,
    ) {
        let config = build_config(
            first_boundary,
            boundary_gaps,
            rate_steps,
            cess_bp,
            surcharge,
            levies,
            consultant_rates,
            pf_bp,
            period,
            rebate_limit,
        );
        let earner = earner(consultant);
        let target = Decimal::from(target);

        let solution = IncomeSolver::new(&config).solve(target, earner).unwrap();
        let gross = u64::try_from(solution.gross_income).unwrap();

        prop_assert_eq!(solution.assessment.take_home, take_home(&config, gross, earner));
        prop_assert!(solution.assessment.take_home >= target);
        if gross > 0 {
            prop_assert!(take_home(&config, gross - 1, earner) < target);
        }
    }
}
