//! Azami 値フォーマットエンジン
//!
//! このクレートは、デバッガホストから渡された型付きの値を人間が読みやすい
//! 文字列へ変換する中核機能を提供します。型名パターンのレジストリ、
//! 宣言長によるメモリ分類、テキストデコード、各型のフォーマッタを含みます。

pub mod classify;
pub mod decode;
pub mod errors;
pub mod eval;
pub mod formatters;
pub mod memory;
pub mod registry;
pub mod value;

pub use classify::{classify, Classification, DEFAULT_LEN_THRESHOLD, SENTINEL_EMPTY, SENTINEL_UNINITIALIZED};
pub use decode::decode_quoted;
pub use errors::{
    marker_on_error, DecodeError, EvaluationError, FieldError, MemoryReadError, PatternError,
    RenderError, FALLBACK_MARKER,
};
pub use eval::Evaluator;
pub use formatters::{
    register_defaults, register_path, PathFormatter, StrFormatter, Vec2Formatter, Vec4Formatter,
};
pub use memory::MemoryReader;
pub use registry::{FormatterRegistry, TypeFormatter};
pub use value::Value;
