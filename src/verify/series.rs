//! Series and base checks

use super::Context;
use crate::charm::url::{CharmUrl, is_local_path};
use crate::common::names::{is_valid_base, is_valid_series};

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let bundle = ctx.bundle;
    let mut defects = Vec::new();

    if let Some(series) = &bundle.series {
        if !is_valid_series(series) {
            defects.push(format!("bundle declares an invalid series {series:?}"));
        }
    }
    if let Some(base) = &bundle.base {
        if !is_valid_base(base) {
            defects.push(format!("bundle declares an invalid base {base:?}"));
        }
    }

    for (id, machine) in &bundle.machines {
        defects.extend(entity_defects("machine", id, machine.series.as_deref(), machine.base.as_deref()));
    }

    for (name, app) in &bundle.applications {
        defects.extend(entity_defects("application", name, app.series.as_deref(), app.base.as_deref()));

        let Some(series) = &app.series else { continue };
        if is_local_path(&app.charm) {
            continue;
        }
        // An unparseable charm URL is reported by the application checks
        if let Ok(url) = CharmUrl::parse(&app.charm) {
            if url.series.as_ref().is_some_and(|s| s != series) {
                defects.push(format!(
                    "the charm URL for application {name:?} has a series which does not match, please remove the series from the URL"
                ));
            }
        }
    }

    defects
}

fn entity_defects(kind: &str, id: &str, series: Option<&str>, base: Option<&str>) -> Vec<String> {
    let mut defects = Vec::new();
    if let Some(series) = series {
        if !is_valid_series(series) {
            defects.push(format!("{kind} {id:?} declares an invalid series {series:?}"));
        }
    }
    if let Some(base) = base {
        if !is_valid_base(base) {
            defects.push(format!("{kind} {id:?} declares an invalid base {base:?}"));
        }
    }
    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{ApplicationSpec, BundleData, MachineSpec};
    use crate::verify::Validators;

    fn run(bundle: &BundleData) -> Vec<String> {
        let validators = Validators::permissive();
        let ctx = Context {
            bundle,
            validators: &validators,
            charms: None,
            local_base: None,
        };
        let mut defects = check(&ctx);
        defects.sort();
        defects
    }

    #[test]
    fn test_valid_series() {
        let mut bundle = BundleData::new();
        bundle.series = Some("focal".to_string());
        bundle.base = Some("ubuntu@20.04".to_string());
        assert!(run(&bundle).is_empty());
    }

    #[test]
    fn test_invalid_series_everywhere() {
        let mut bundle = BundleData::new();
        bundle.series = Some("Focal".to_string());
        bundle.base = Some("ubuntu".to_string());
        bundle.machines.insert(
            "0".to_string(),
            MachineSpec {
                series: Some("9x".to_string()),
                ..MachineSpec::default()
            },
        );
        let mut app = ApplicationSpec::new("mysql");
        app.series = Some("bad-series".to_string());
        bundle.add_application("mysql", app);

        assert_eq!(
            run(&bundle),
            vec![
                "application \"mysql\" declares an invalid series \"bad-series\"",
                "bundle declares an invalid base \"ubuntu\"",
                "bundle declares an invalid series \"Focal\"",
                "machine \"0\" declares an invalid series \"9x\"",
            ]
        );
    }

    #[test]
    fn test_charm_url_series_mismatch() {
        let mut bundle = BundleData::new();
        let mut app = ApplicationSpec::new("cs:trusty/mysql-3");
        app.series = Some("xenial".to_string());
        bundle.add_application("mysql", app);
        let mut same = ApplicationSpec::new("cs:xenial/wordpress");
        same.series = Some("xenial".to_string());
        bundle.add_application("wordpress", same);

        assert_eq!(
            run(&bundle),
            vec![
                "the charm URL for application \"mysql\" has a series which does not match, please remove the series from the URL"
            ]
        );
    }
}
