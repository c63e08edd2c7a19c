mod cli;

use clap::Parser;
use cli::{Args, Command};
use colored::Colorize;
use inspection::{
    DeviceKind, FacingMode, HttpDetectClient, ImageData, InspectionPage, MediaDevices, RowStyle,
    StillFrameDevices, Verdict, config::get_configuration, logging::setup_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = get_configuration()?;
    setup_logging(&config);

    if let Some(url) = args.proxy_url {
        config.proxy_url = url;
    }
    if args.overlay {
        config.show_overlay = true;
    }

    tracing::info!(proxy = %config.proxy_url, "Inspection client starting");
    let client = HttpDetectClient::new(config.proxy_url.clone());

    match args.command {
        Command::Upload { paths } => {
            let page_config = config.page_config(DeviceKind::Desktop);
            let mut page = InspectionPage::new(client, StillFrameDevices::new(), page_config);

            for path in paths {
                let image = ImageData::from_path(&path)?;
                println!("{}", path.display().to_string().bold());

                let pending = page.upload(image);
                let completed = pending.run().await;
                page.apply(completed);
                print_report(&page);
            }
        }
        Command::Camera {
            front,
            rear,
            mobile,
            switch,
        } => {
            let mut devices = StillFrameDevices::new();
            if let Some(front) = front {
                devices = devices.with_file(FacingMode::User, front)?;
            }
            if let Some(rear) = rear {
                devices = devices.with_file(FacingMode::Environment, rear)?;
            }

            let device_kind = if mobile {
                DeviceKind::Mobile
            } else {
                DeviceKind::Desktop
            };
            let mut page = InspectionPage::new(client, devices, config.page_config(device_kind));

            let facing = match page.start_camera() {
                Ok(facing) => facing,
                Err(e) => {
                    eprintln!("{}", page.camera_error().unwrap_or_default().red());
                    return Err(e.into());
                }
            };
            println!("camera: {facing}");

            if switch {
                match page.switch_camera() {
                    Ok(now) if now == facing => println!("camera: {now} (switch unavailable)"),
                    Ok(now) => println!("camera: {now}"),
                    Err(e) => {
                        eprintln!("{}", page.camera_error().unwrap_or_default().red());
                        return Err(e.into());
                    }
                }
            }

            let pending = page.capture()?;
            let completed = pending.run().await;
            page.apply(completed);
            print_report(&page);
        }
    }

    Ok(())
}

fn print_report<D: MediaDevices>(page: &InspectionPage<HttpDetectClient, D>) {
    if let Some(error) = page.error() {
        println!("  {}", error.red());
        return;
    }

    match page.verdict() {
        Some(verdict @ Verdict::DefectsDetected) => {
            println!("  {}", verdict.label().red().bold())
        }
        Some(verdict @ Verdict::NoDefects) => println!("  {}", verdict.label().green().bold()),
        None => return,
    }

    for row in page.result_rows() {
        let line = format!("    {:<24} {:>7}", row.class, row.confidence);
        match row.style {
            RowStyle::Defect => println!("{}", line.red()),
            RowStyle::Pass => println!("{}", line.green()),
        }
    }

    for overlay in page.overlay() {
        println!(
            "    box {:<24} at ({:.0}, {:.0}) size {:.0}x{:.0}",
            overlay.label, overlay.left, overlay.top, overlay.width, overlay.height
        );
    }
}
