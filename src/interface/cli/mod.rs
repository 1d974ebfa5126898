//! CLI 인터페이스 모듈 묶음.
//! 입력 파싱/명령 실행을 한 네임스페이스로 관리한다.

pub mod command;
pub mod install;

pub use command::{Cli, CliAction, InstallOptions};
pub use install::run_install;
