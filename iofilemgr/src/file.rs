//! 以文件描述符为单位的操作

use crate::backend::IoBackend;
use crate::config::{DEFAULT_MODE, READ_CHUNK_SIZE};
use crate::error::{check, check_off, check_size, Errno, Result};
use crate::flags::{IoMode, OpenFlags, SeekFrom};
use crate::manager::IoManager;
use crate::types::*;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

// 内核的单次读写长度是SceSize
pub(crate) fn check_len(len: usize) -> Result<SceSize> {
    SceSize::try_from(len).map_err(|_| Errno::EINVAL.into())
}

pub(crate) fn checked_len(buf: &[u8]) -> Result<SceSize> {
    check_len(buf.len())
}

// 偏移量超出SceOff时返回EINVAL
fn check_offset(offset: u64) -> Result<SceOff> {
    SceOff::try_from(offset).map_err(|_| Errno::EINVAL.into())
}

// 内核报告的字节数不能超过缓冲区长度
fn check_read(n: usize, buf: &[u8]) -> Result<usize> {
    if n > buf.len() {
        Err(Errno::EIO.into())
    } else {
        Ok(n)
    }
}

/// 已打开的文件
///
/// 持有文件描述符，drop时自动关闭。
pub struct File {
    // None表示描述符已经关闭或被取走
    fd: Option<SceUID>,
    backend: Arc<dyn IoBackend>,
}

impl File {
    // 接管一个已打开的文件描述符
    pub fn from_raw_fd(backend: Arc<dyn IoBackend>, fd: SceUID) -> Self {
        Self {
            fd: Some(fd),
            backend,
        }
    }

    // 交出文件描述符，之后不再自动关闭
    pub fn into_raw_fd(mut self) -> SceUID {
        self.fd.take().unwrap_or(-1)
    }

    pub fn fd(&self) -> SceUID {
        self.fd.unwrap_or(-1)
    }

    fn raw(&self) -> Result<SceUID> {
        self.fd.ok_or_else(|| Errno::EBADF.into())
    }

    // 从当前位置读取，返回读到的字节数，0表示文件结束
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let fd = self.raw()?;
        checked_len(buf)?;
        let n = check_size(self.backend.read(fd, buf))?;
        trace!("read fd={:#x} len={} -> {}", fd, buf.len(), n);
        check_read(n, buf)
    }

    // 读取到文件结束，返回读到的字节数
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let mut buffer = [0u8; READ_CHUNK_SIZE];
        let mut total = 0;
        loop {
            let len = self.read(&mut buffer)?;
            if len == 0 {
                break;
            }
            total += len;
            out.extend_from_slice(&buffer[..len]);
        }
        Ok(total)
    }

    // 写入到当前位置，返回写入的字节数（可能少于buf的长度）
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let fd = self.raw()?;
        checked_len(buf)?;
        let n = check_size(self.backend.write(fd, buf))?;
        trace!("write fd={:#x} len={} -> {}", fd, buf.len(), n);
        Ok(n)
    }

    // 写入全部数据。内核一个字节也没写入时，返回EIO
    pub fn write_all(&mut self, mut buf: &[u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(Errno::EIO.into()),
                n => buf = &buf[n.min(buf.len())..],
            }
        }
        Ok(())
    }

    // 移动读写位置，返回新的位置
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let fd = self.raw()?;
        let (offset, whence) = pos.to_raw()?;
        check_off(self.backend.lseek(fd, offset, whence))
    }

    pub fn stream_position(&mut self) -> Result<u64> {
        self.seek(SeekFrom::Current(0))
    }

    // 文件长度。通过移动到文件末尾得到，之后恢复原来的位置
    pub fn len(&mut self) -> Result<u64> {
        let pos = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if end != pos {
            self.seek(SeekFrom::Start(pos))?;
        }
        Ok(end)
    }

    // 从指定位置读取，不改变当前位置
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let fd = self.raw()?;
        checked_len(buf)?;
        let offset = check_offset(offset)?;
        let n = check_size(self.backend.pread(fd, buf, offset))?;
        check_read(n, buf)
    }

    // 写入到指定位置，不改变当前位置
    pub fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize> {
        let fd = self.raw()?;
        checked_len(buf)?;
        let offset = check_offset(offset)?;
        check_size(self.backend.pwrite(fd, buf, offset))
    }

    // 将该文件的数据写回设备，flag的含义由设备决定
    pub fn sync(&self, flag: i32) -> Result<()> {
        let fd = self.raw()?;
        check(self.backend.sync_by_fd(fd, flag)).map(|_| ())
    }

    // 内核未实现，总是返回Error::Unsupported
    pub fn ioctl_async(
        &self,
        cmd: i32,
        arg: &[u8],
        buf: &mut [u8],
        param: &mut SceIoAsyncParam,
    ) -> Result<()> {
        let fd = self.raw()?;
        checked_len(arg)?;
        checked_len(buf)?;
        check(self.backend.ioctl_async(fd, cmd, arg, buf, param)).map(|_| ())
    }

    // 关闭文件。无论是否成功，描述符都不再属于该File
    pub fn close(mut self) -> Result<()> {
        match self.fd.take() {
            Some(fd) => {
                debug!("close fd={:#x}", fd);
                check(self.backend.close(fd)).map(|_| ())
            }
            None => Ok(()),
        }
    }
}

impl Drop for File {
    fn drop(&mut self) {
        if let Some(fd) = self.fd.take() {
            let ret = self.backend.close(fd);
            if let Err(err) = check(ret) {
                warn!("failed to close fd={:#x} on drop: {}", fd, err);
            }
        }
    }
}

impl Debug for File {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("File").field("fd", &self.fd).finish()
    }
}

/// 打开文件的选项，用法同std::fs::OpenOptions
///
/// 和std一样，read和write都没有设置时打开失败（EINVAL）。
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    flags: OpenFlags,
    mode: IoMode,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self {
            flags: OpenFlags::empty(),
            mode: DEFAULT_MODE,
        }
    }

    fn set(&mut self, flag: OpenFlags, value: bool) -> &mut Self {
        self.flags.set(flag, value);
        self
    }

    pub fn read(&mut self, read: bool) -> &mut Self {
        self.set(OpenFlags::RDONLY, read)
    }

    pub fn write(&mut self, write: bool) -> &mut Self {
        self.set(OpenFlags::WRONLY, write)
    }

    // 每次写入都追加到文件末尾，隐含可写
    pub fn append(&mut self, append: bool) -> &mut Self {
        if append {
            self.flags.insert(OpenFlags::WRONLY);
        }
        self.set(OpenFlags::APPEND, append)
    }

    pub fn truncate(&mut self, truncate: bool) -> &mut Self {
        self.set(OpenFlags::TRUNC, truncate)
    }

    pub fn create(&mut self, create: bool) -> &mut Self {
        self.set(OpenFlags::CREAT, create)
    }

    // 文件已存在时失败
    pub fn create_new(&mut self, create_new: bool) -> &mut Self {
        self.set(OpenFlags::CREAT | OpenFlags::EXCL, create_new)
    }

    // 其他标志，如NOBUF、FDEXCL
    pub fn custom_flags(&mut self, flags: OpenFlags) -> &mut Self {
        self.flags.insert(flags);
        self
    }

    pub fn mode(&mut self, mode: IoMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    pub fn open(&self, manager: &IoManager, path: &str) -> Result<File> {
        if !self.flags.intersects(OpenFlags::RDWR) {
            return Err(Errno::EINVAL.into());
        }
        manager.open(path, self.flags, self.mode)
    }
}
