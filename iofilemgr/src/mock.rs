//! 在主机上代替内核的后端
//!
//! `MockBackend`记录每一次调用，并按顺序返回预先设置的结果。
//! 它不保存任何文件内容，只用来检查参数的传递和返回值的解析。

use crate::backend::IoBackend;
use crate::consts::{SCE_KERNEL_ERROR_UNSUP, SCE_SEEK_SET};
use crate::types::*;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::CStr;
use spin::Mutex;

// 一次调用及其参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Remove { path: String },
    Mkdir { path: String, mode: SceIoMode },
    Rmdir { path: String },
    Rename { old: String, new: String },
    Devctl { dev: String, cmd: i32, arg: Vec<u8>, out_len: usize },
    Sync { dev: String, flag: i32 },
    Open { path: String, flags: i32, mode: SceIoMode },
    Close { fd: SceUID },
    Lseek { fd: SceUID, offset: SceOff, whence: i32 },
    Read { fd: SceUID, len: usize },
    Write { fd: SceUID, data: Vec<u8> },
    Pread { fd: SceUID, len: usize, offset: SceOff },
    Pwrite { fd: SceUID, data: Vec<u8>, offset: SceOff },
    SyncByFd { fd: SceUID, flag: i32 },
    IoctlAsync { fd: SceUID, cmd: i32 },
    DevctlAsync { dev: String, cmd: i32 },
    Mount { id: i32, path: Option<String>, permission: i32, args: [i32; 3] },
    Umount { id: i32, args: [i32; 3] },
}

// 预设的返回结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    // 原样返回（按返回类型截断）
    Code(i64),
    // 复制到输出缓冲区，返回复制的字节数（devctl返回0）。没有输出缓冲区的调用返回数据长度
    Data(Vec<u8>),
}

impl Reply {
    pub fn error(code: u32) -> Self {
        Reply::Code(code as i32 as i64)
    }
}

struct MockInner {
    calls: Vec<Call>,
    replies: VecDeque<Reply>,
    next_fd: SceUID,
}

pub struct MockBackend {
    inner: Mutex<MockInner>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lossy(s: &CStr) -> String {
    String::from_utf8_lossy(s.to_bytes()).into_owned()
}

// 将数据复制到buf，返回复制的字节数
fn fill(buf: &mut [u8], data: &[u8]) -> usize {
    let n = buf.len().min(data.len());
    buf[..n].copy_from_slice(&data[..n]);
    n
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockInner {
                calls: Vec::new(),
                replies: VecDeque::new(),
                next_fd: 1,
            }),
        }
    }

    // 追加一个预设结果，按调用顺序消费
    pub fn push_reply(&self, reply: Reply) {
        self.inner.lock().replies.push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        core::mem::take(&mut self.inner.lock().calls)
    }

    // 记录调用，取出下一个预设结果
    fn record(&self, call: Call) -> Option<Reply> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        inner.replies.pop_front()
    }

    // 不涉及输出缓冲区的调用
    fn simple(&self, call: Call, default: i64) -> i64 {
        match self.record(call) {
            Some(Reply::Code(code)) => code,
            Some(Reply::Data(data)) => data.len() as i64,
            None => default,
        }
    }

    // 涉及输出缓冲区的调用
    fn with_output(&self, call: Call, buf: &mut [u8], default: i64) -> i64 {
        match self.record(call) {
            Some(Reply::Code(code)) => code,
            Some(Reply::Data(data)) => fill(buf, &data) as i64,
            None => default,
        }
    }
}

impl IoBackend for MockBackend {
    fn remove(&self, path: &CStr) -> i32 {
        self.simple(Call::Remove { path: lossy(path) }, 0) as i32
    }

    fn mkdir(&self, path: &CStr, mode: SceIoMode) -> i32 {
        self.simple(
            Call::Mkdir {
                path: lossy(path),
                mode,
            },
            0,
        ) as i32
    }

    fn rmdir(&self, path: &CStr) -> i32 {
        self.simple(Call::Rmdir { path: lossy(path) }, 0) as i32
    }

    fn rename(&self, old: &CStr, new: &CStr) -> i32 {
        self.simple(
            Call::Rename {
                old: lossy(old),
                new: lossy(new),
            },
            0,
        ) as i32
    }

    fn devctl(&self, dev: &CStr, cmd: i32, arg: &[u8], buf: &mut [u8]) -> i32 {
        let call = Call::Devctl {
            dev: lossy(dev),
            cmd,
            arg: arg.to_vec(),
            out_len: buf.len(),
        };
        match self.record(call) {
            Some(Reply::Code(code)) => code as i32,
            Some(Reply::Data(data)) => {
                fill(buf, &data);
                0
            }
            None => 0,
        }
    }

    fn sync(&self, dev: &CStr, flag: i32) -> i32 {
        self.simple(
            Call::Sync {
                dev: lossy(dev),
                flag,
            },
            0,
        ) as i32
    }

    fn open(&self, path: &CStr, flags: i32, mode: SceIoMode) -> SceUID {
        let call = Call::Open {
            path: lossy(path),
            flags,
            mode,
        };
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        match inner.replies.pop_front() {
            Some(Reply::Code(code)) => code as SceUID,
            Some(Reply::Data(data)) => data.len() as SceUID,
            None => {
                let fd = inner.next_fd;
                inner.next_fd += 1;
                fd
            }
        }
    }

    fn close(&self, fd: SceUID) -> i32 {
        self.simple(Call::Close { fd }, 0) as i32
    }

    fn lseek(&self, fd: SceUID, offset: SceOff, whence: i32) -> SceOff {
        let default = if whence == SCE_SEEK_SET { offset } else { 0 };
        self.simple(Call::Lseek { fd, offset, whence }, default)
    }

    fn read(&self, fd: SceUID, buf: &mut [u8]) -> SceSSize {
        let call = Call::Read { fd, len: buf.len() };
        self.with_output(call, buf, 0) as SceSSize
    }

    fn write(&self, fd: SceUID, buf: &[u8]) -> SceSSize {
        let call = Call::Write {
            fd,
            data: buf.to_vec(),
        };
        self.simple(call, buf.len() as i64) as SceSSize
    }

    fn pread(&self, fd: SceUID, buf: &mut [u8], offset: SceOff) -> SceSSize {
        let call = Call::Pread {
            fd,
            len: buf.len(),
            offset,
        };
        self.with_output(call, buf, 0) as SceSSize
    }

    fn pwrite(&self, fd: SceUID, buf: &[u8], offset: SceOff) -> SceSSize {
        let call = Call::Pwrite {
            fd,
            data: buf.to_vec(),
            offset,
        };
        self.simple(call, buf.len() as i64) as SceSSize
    }

    fn sync_by_fd(&self, fd: SceUID, flag: i32) -> i32 {
        self.simple(Call::SyncByFd { fd, flag }, 0) as i32
    }

    fn ioctl_async(
        &self,
        fd: SceUID,
        cmd: i32,
        _arg: &[u8],
        _buf: &mut [u8],
        _param: &mut SceIoAsyncParam,
    ) -> i32 {
        self.simple(
            Call::IoctlAsync { fd, cmd },
            SCE_KERNEL_ERROR_UNSUP as i32 as i64,
        ) as i32
    }

    fn devctl_async(
        &self,
        dev: &CStr,
        cmd: i32,
        _arg: &[u8],
        _buf: &mut [u8],
        _param: &mut SceIoAsyncParam,
    ) -> i32 {
        self.simple(
            Call::DevctlAsync {
                dev: lossy(dev),
                cmd,
            },
            SCE_KERNEL_ERROR_UNSUP as i32 as i64,
        ) as i32
    }

    fn mount(&self, id: i32, path: Option<&CStr>, permission: i32, args: [i32; 3]) -> i32 {
        let call = Call::Mount {
            id,
            path: path.map(lossy),
            permission,
            args,
        };
        self.simple(call, 0) as i32
    }

    fn umount(&self, id: i32, args: [i32; 3]) -> i32 {
        self.simple(Call::Umount { id, args }, 0) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_consumed_in_order() {
        let mock = MockBackend::new();
        mock.push_reply(Reply::Code(-5));
        mock.push_reply(Reply::Data(b"hello".to_vec()));
        let mut buf = [0u8; 3];
        assert_eq!(mock.read(1, &mut buf), -5);
        assert_eq!(mock.read(1, &mut buf), 3);
        assert_eq!(&buf, b"hel");
        assert_eq!(mock.read(1, &mut buf), 0);
    }

    #[test]
    fn descriptors_are_unique() {
        let mock = MockBackend::new();
        let path = CStr::from_bytes_with_nul(b"ux0:a\0").unwrap();
        let a = mock.open(path, 1, 0);
        let b = mock.open(path, 1, 0);
        assert!(a >= 0 && b > a);
    }

    #[test]
    fn open_follows_scripted_replies() {
        let mock = MockBackend::new();
        let path = CStr::from_bytes_with_nul(b"ux0:a\0").unwrap();
        mock.push_reply(Reply::Data(vec![0; 7]));
        mock.push_reply(Reply::Code(-2));
        assert_eq!(mock.open(path, 1, 0), 7);
        assert_eq!(mock.open(path, 1, 0), -2);
        // 预设结果用完后分配新的描述符
        assert_eq!(mock.open(path, 1, 0), 1);
    }

    #[test]
    fn async_calls_default_to_unsupported() {
        let mock = MockBackend::new();
        let dev = CStr::from_bytes_with_nul(b"ux0:\0").unwrap();
        let mut param = SceIoAsyncParam::default();
        let ret = mock.devctl_async(dev, 1, &[], &mut [], &mut param);
        assert_eq!(ret as u32, SCE_KERNEL_ERROR_UNSUP);
        let ret = mock.ioctl_async(1, 1, &[], &mut [], &mut param);
        assert_eq!(ret as u32, SCE_KERNEL_ERROR_UNSUP);
    }

    #[test]
    fn error_reply_helper() {
        assert_eq!(Reply::error(0x8001_0002), Reply::Code(-2147418110));
    }
}
