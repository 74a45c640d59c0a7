//! プロセスへのアタッチとデタッチ

use crate::Result;
use nix::sys::ptrace;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

/// 検査対象のプロセス
///
/// アタッチ中のみ存在し、ドロップ時にデタッチします。値の描画は
/// プロセスが停止している間にのみ行われる前提です。
pub struct Process {
    pid: Pid,
}

impl Process {
    /// 既存のプロセスにアタッチする
    ///
    /// アタッチ後、プロセスが停止するまで待機してから返します。
    /// メモリ読み取りは停止状態が前提のためです。
    pub fn attach(pid: i32) -> Result<Self> {
        let pid = Pid::from_raw(pid);
        ptrace::attach(pid)?;

        // 停止イベントを待機
        match waitpid(pid, None)? {
            WaitStatus::Stopped(_, _) => Ok(Self { pid }),
            status => Err(anyhow::anyhow!(
                "Unexpected wait status after attach: {:?}",
                status
            )),
        }
    }

    /// プロセスIDを取得する
    pub fn pid(&self) -> i32 {
        self.pid.as_raw()
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        let _ = ptrace::detach(self.pid, None);
    }
}
