//! Domain layer
//! provider 구성 → 모델 할당 해석, plugin 목록/병합 규칙을 외부 I/O 없이 표현한다.

pub mod capability;
pub mod detect;
pub mod diagnostic;
pub mod host;
pub mod merge;
pub mod plugin;
pub mod provider;
pub mod resolution;
