//! Azami ターゲットプロセスアクセス
//!
//! このクレートは、停止中の検査対象プロセスへのアタッチ、メモリの
//! 読み取り、および生メモリ上の値をフォーマットエンジンへ渡すための
//! アダプタを提供します。

pub mod layout;
pub mod memory;
pub mod process;

pub use layout::{FieldKind, FieldLayout, LayoutTable, LiveValue, TypeLayout};
pub use memory::Memory;
pub use process::Process;

/// ターゲットアクセスの結果型
pub type Result<T> = anyhow::Result<T>;
