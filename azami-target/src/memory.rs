//! 検査対象プロセスのメモリ読み取り

use crate::Result;
use azami_format::{MemoryReadError, MemoryReader};
use nix::unistd::Pid;
use std::fs::File;
use std::io::{Read as _, Seek, SeekFrom};

/// 検査対象プロセスのメモリアクセス
pub struct Memory {
    pid: Pid,
}

impl Memory {
    /// メモリアクセスを作成する
    pub fn new(pid: i32) -> Self {
        Self {
            pid: Pid::from_raw(pid),
        }
    }

    /// /proc/pid/mem のパスを取得する
    fn mem_path(&self) -> String {
        format!("/proc/{}/mem", self.pid)
    }

    /// メモリからデータを読み取る
    ///
    /// /proc/pid/memを使用してターゲットプロセスのメモリを読み取ります。
    /// /proc/pid/memが使用できない場合（EIOエラー）、PTRACE_PEEKDATAに
    /// フォールバックします。
    pub fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>> {
        match self.read_via_proc_mem(addr, len) {
            Ok(data) => Ok(data),
            Err(e) => {
                if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
                    if io_err.raw_os_error() == Some(5) {
                        // EIO (errno 5): ptraceにフォールバック
                        return self.read_via_ptrace(addr, len);
                    }
                }
                Err(e)
            }
        }
    }

    /// /proc/pid/mem経由でメモリを読み取る（内部実装）
    fn read_via_proc_mem(&self, addr: u64, len: usize) -> Result<Vec<u8>> {
        let mem_path = self.mem_path();
        let mut file = File::open(&mem_path)
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", mem_path, e))?;

        // 指定されたアドレスにシーク
        file.seek(SeekFrom::Start(addr))?;

        // データを読み取る
        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    /// PTRACE_PEEKDATAを使用してメモリからデータを読み取る
    ///
    /// /proc/pid/memが使用できない場合のフォールバック。
    pub fn read_via_ptrace(&self, addr: u64, len: usize) -> Result<Vec<u8>> {
        use nix::sys::ptrace;

        let mut data = Vec::with_capacity(len);
        let word_size = std::mem::size_of::<usize>();

        // word単位で読み取り
        for offset in (0..len).step_by(word_size) {
            let word_addr = (addr as usize + offset) as *mut std::ffi::c_void;
            let word = ptrace::read(self.pid, word_addr).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to read via ptrace at 0x{:x}: {}",
                    addr as usize + offset,
                    e
                )
            })?;

            // wordをバイト列に変換
            let bytes = word.to_ne_bytes();
            let remaining = len - offset;
            let copy_size = remaining.min(word_size);

            data.extend_from_slice(&bytes[..copy_size]);
        }

        data.truncate(len);
        Ok(data)
    }
}

/// フォーマットエンジンのMemoryReader能力を実装する
///
/// ホスト側のエラーは理由文字列ごと `MemoryReadError` に変換され、
/// フォーマッタ境界でフォールバックマーカーに吸収されます。
impl MemoryReader for Memory {
    fn read(&self, addr: u64, len: usize) -> std::result::Result<Vec<u8>, MemoryReadError> {
        self.read_bytes(addr, len).map_err(|e| MemoryReadError {
            addr,
            len,
            reason: e.to_string(),
        })
    }
}
