//! 宣言長によるメモリスパンの分類
//!
//! 読み取りを行う前に、宣言された長さだけを見てスパンが空か、未初期化の
//! 疑いがあるか、読み取り可能かを判定します。これはヒューリスティック
//! であり、`Readable` と分類されたスパンの読み取りが失敗することは
//! あります。

/// 未初期化と見なす長さのしきい値（デフォルト）
///
/// これを超える長さは、実際の割り当てよりも未初期化・破損した値である
/// 可能性がはるかに高いため、読み取りを試みません。巨大な正規の
/// バッファを誤報する小さなリスクと引き換えに、ゴミ値の読み取りで
/// ホストを巻き込む事故を防ぎます。
pub const DEFAULT_LEN_THRESHOLD: u64 = 99_999_999;

/// 空バッファを示すセンチネル文字列
pub const SENTINEL_EMPTY: &str = "{empty}";

/// 未初期化バッファを示すセンチネル文字列
pub const SENTINEL_UNINITIALIZED: &str = "{uninitialized}";

/// メモリスパンの分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 長さ0の有効なバッファ（構築直後など）
    Empty,
    /// 長さがしきい値を超える（未初期化の疑い）
    Uninitialized,
    /// 読み取りを試みてよいスパン
    Readable,
}

/// 宣言長を分類する
///
/// 判定は順に、長さ0 → `Empty`、しきい値超過 → `Uninitialized`、
/// それ以外 → `Readable` です。副作用もI/Oもありません。
pub fn classify(declared_len: u64, threshold: u64) -> Classification {
    if declared_len == 0 {
        Classification::Empty
    } else if declared_len > threshold {
        Classification::Uninitialized
    } else {
        Classification::Readable
    }
}
