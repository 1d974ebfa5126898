//! `install` 명령 실행 흐름.

use anyhow::{Context, Result};

use super::command::InstallOptions;
use crate::application::availability::availability_from_args;
use crate::application::ports::Reporter;
use crate::application::usecases::install::InstallOutcome;
use crate::interface::composition::AppComposition;

/// 설치를 실행하고 프로세스 종료 코드를 돌려준다.
pub async fn run_install(composition: &AppComposition, options: InstallOptions) -> Result<i32> {
    let ctx = composition.context(options.config_dir.as_deref())?;
    let detected = composition.detect_providers_usecase().execute(&ctx);
    let availability = availability_from_args(&options.providers, detected.as_ref())?;
    let reporter = composition.reporter();

    if detected.is_some() {
        reporter.status("mode", "update: omitted flags keep the detected providers");
    }

    let install = composition.install_usecase();
    if options.dry_run {
        let plan = install.plan(&ctx, &availability).await;
        reporter.section("Dry run");
        reporter.raw(
            &serde_json::to_string_pretty(&plan).context("failed to render install plan")?,
        );
        return Ok(InstallOutcome::Complete.exit_code());
    }

    let report = install.execute(&ctx, &availability).await;

    if options.check_update
        && composition.config().check_update()
        && let Some(notice) = composition.check_update_usecase().execute(&ctx).await
    {
        reporter.status(
            "update",
            &format!(
                "{} {} is available (current {})",
                ctx.package_name(),
                notice.latest_version,
                notice.current_version
            ),
        );
    }

    Ok(report.outcome.exit_code())
}
