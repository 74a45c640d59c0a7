//! 読み取ったバイト列のデコードとエスケープ

use crate::errors::DecodeError;

/// バイト列をUTF-8テキストとしてデコードする
///
/// 不正なバイト列の場合は `DecodeError` を返します。呼び出し側で
/// フォールバックマーカーへ変換される前提です。
pub fn decode(bytes: &[u8]) -> Result<String, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.to_string())
}

/// 制御文字を表示用にエスケープする
///
/// リテラルの改行とタブをそれぞれ2文字のシーケンス `\n` `\t` に
/// 置き換えます。それ以外のバイトはそのまま通します。
pub fn escape(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t")
}

/// デコード・エスケープして二重引用符で囲む
pub fn decode_quoted(bytes: &[u8]) -> Result<String, DecodeError> {
    let text = decode(bytes)?;
    Ok(format!("\"{}\"", escape(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_quoted_roundtrip() {
        // 改行・タブを含まないバイト列はそのまま引用されるだけ
        let result = decode_quoted(b"hello world").unwrap();
        assert_eq!(result, "\"hello world\"");
    }

    #[test]
    fn test_decode_quoted_escapes_control_characters() {
        // リテラルの改行とタブは2文字のエスケープになる
        let result = decode_quoted(b"a\nb\tc").unwrap();
        assert_eq!(result, "\"a\\nb\\tc\"");
        assert_eq!(result.chars().count(), 9);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode(&[0x68, 0x65, 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.valid_up_to, 2);
    }

    #[test]
    fn test_decode_quoted_empty_bytes() {
        assert_eq!(decode_quoted(b"").unwrap(), "\"\"");
    }
}
