use clap::{CommandFactory, Parser};
use git_group_backup::{group_backup_main, GroupBackupCli};
use std::process::exit;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = GroupBackupCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp_secs()
        .init();
    log::debug!(concat!(
        env!("CARGO_PKG_NAME"),
        " ",
        env!("CARGO_PKG_VERSION")
    ));
    match group_backup_main(args).await {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            if e.is_config() {
                eprintln!("{}", GroupBackupCli::command().render_help());
            }
            log::error!("{e}");
            exit(1);
        }
    };
}
