//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod config_store;
mod npm_registry;
mod reporter;

pub use config_repository::JsonConfigRepository;
pub use config_store::FsConfigStore;
pub use npm_registry::HttpPackageRegistry;
pub use reporter::ConsoleReporter;
