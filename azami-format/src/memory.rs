//! メモリ読み取りの抽象化
//!
//! デバッガホストが提供するメモリアクセスを抽象化します。

use crate::errors::MemoryReadError;

/// 検査対象プロセスのメモリを読み取る能力
///
/// 実装は、アドレス範囲が未マップ・アクセス不能、またはプロセスが
/// 停止していない場合に `MemoryReadError` を返します。このエラーは
/// 描画要求に対して致命的であってはならず、呼び出し側でフォールバック
/// マーカーへ変換されます。
pub trait MemoryReader {
    /// 指定アドレスからバイト列を読み取る
    fn read(&self, addr: u64, len: usize) -> Result<Vec<u8>, MemoryReadError>;

    /// u64値を読み取る（リトルエンディアン）
    fn read_u64(&self, addr: u64) -> Result<u64, MemoryReadError> {
        let bytes = self.read(addr, 8)?;
        Ok(u64::from_le_bytes(to_array(addr, &bytes)?))
    }

    /// u32値を読み取る（リトルエンディアン）
    fn read_u32(&self, addr: u64) -> Result<u32, MemoryReadError> {
        let bytes = self.read(addr, 4)?;
        Ok(u32::from_le_bytes(to_array(addr, &bytes)?))
    }

    /// f32値を読み取る（リトルエンディアン）
    fn read_f32(&self, addr: u64) -> Result<f32, MemoryReadError> {
        let bytes = self.read(addr, 4)?;
        Ok(f32::from_le_bytes(to_array(addr, &bytes)?))
    }

    /// f64値を読み取る（リトルエンディアン）
    fn read_f64(&self, addr: u64) -> Result<f64, MemoryReadError> {
        let bytes = self.read(addr, 8)?;
        Ok(f64::from_le_bytes(to_array(addr, &bytes)?))
    }
}

/// 読み取ったバイト列を固定長配列に変換する
fn to_array<const N: usize>(addr: u64, bytes: &[u8]) -> Result<[u8; N], MemoryReadError> {
    bytes.try_into().map_err(|_| MemoryReadError {
        addr,
        len: N,
        reason: format!("short read: got {} bytes", bytes.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SliceMemory {
        data: Vec<u8>,
    }

    impl MemoryReader for SliceMemory {
        fn read(&self, addr: u64, len: usize) -> Result<Vec<u8>, MemoryReadError> {
            let start = addr as usize;
            let end = start.checked_add(len).filter(|&e| e <= self.data.len());
            match end {
                Some(end) => Ok(self.data[start..end].to_vec()),
                None => Err(MemoryReadError {
                    addr,
                    len,
                    reason: "out of range".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_typed_reads_are_little_endian() {
        let mut data = vec![0u8; 32];
        data[0..8].copy_from_slice(&0x1122334455667788u64.to_le_bytes());
        data[8..12].copy_from_slice(&1.5f32.to_le_bytes());
        data[16..24].copy_from_slice(&2.5f64.to_le_bytes());

        let memory = SliceMemory { data };
        assert_eq!(memory.read_u64(0).unwrap(), 0x1122334455667788);
        assert_eq!(memory.read_f32(8).unwrap(), 1.5);
        assert_eq!(memory.read_f64(16).unwrap(), 2.5);
    }

    #[test]
    fn test_read_out_of_range_fails() {
        let memory = SliceMemory { data: vec![0u8; 4] };
        assert!(memory.read_u64(0).is_err());
        assert!(memory.read(2, 8).is_err());
    }
}
