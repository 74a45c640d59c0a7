//! 検査対象の値の抽象化

use crate::errors::RenderError;

/// 検査対象プロセス内に存在する型付きの値への参照
///
/// 名前付きフィールドへのアクセスを提供しますが、フィールドの内容が
/// 有効である保証はありません。そのためすべてのアクセサは失敗しうる
/// 操作として定義します。値は描画要求ごとに作られ、要求を超えて
/// 保持されることはありません。
pub trait Value {
    /// 名前付きフィールドを取得する
    fn field<'a>(&'a self, name: &str) -> Result<Box<dyn Value + 'a>, RenderError>;

    /// 値をu64として読む（アドレスや長さのフィールド用）
    fn as_u64(&self) -> Result<u64, RenderError>;

    /// ホスト既定の表示文字列を取得する
    fn display(&self) -> Result<String, RenderError>;

    /// 値の型名を取得する
    fn type_name(&self) -> Result<String, RenderError>;

    /// 値が存在するアドレスを取得する
    fn address(&self) -> Result<u64, RenderError>;
}
