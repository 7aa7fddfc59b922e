//! 以路径和设备为单位的操作

use crate::backend::{global_backend, IoBackend};
use crate::config::MOUNT_RESERVED_ARGS;
use crate::consts::SCE_IO_DEVCTL_GET_DEV_INFO;
use crate::error::{check, Errno, Result};
use crate::file::{checked_len, File};
use crate::flags::{IoMode, OpenFlags};
use crate::path::CPath;
use crate::types::*;
use alloc::sync::Arc;

/// 文件I/O管理器，所有调用都转发给同一个后端
#[derive(Clone)]
pub struct IoManager {
    backend: Arc<dyn IoBackend>,
}

impl IoManager {
    pub fn new(backend: Arc<dyn IoBackend>) -> Self {
        Self { backend }
    }

    // 使用全局默认的后端，没有安装后端时返回None
    pub fn global() -> Option<Self> {
        global_backend().map(Self::new)
    }

    pub fn backend(&self) -> &Arc<dyn IoBackend> {
        &self.backend
    }

    // 删除文件
    pub fn remove(&self, path: &str) -> Result<()> {
        let path = CPath::new(path)?;
        check(self.backend.remove(path.as_cstr())).map(|_| ())
    }

    pub fn mkdir(&self, path: &str, mode: IoMode) -> Result<()> {
        let path = CPath::new(path)?;
        check(self.backend.mkdir(path.as_cstr(), mode.raw())).map(|_| ())
    }

    pub fn rmdir(&self, path: &str) -> Result<()> {
        let path = CPath::new(path)?;
        check(self.backend.rmdir(path.as_cstr())).map(|_| ())
    }

    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        let old = CPath::new(old)?;
        let new = CPath::new(new)?;
        check(self.backend.rename(old.as_cstr(), new.as_cstr())).map(|_| ())
    }

    // 向设备（如"ux0:"）发送devctl命令。arg为空时不发送数据，out为空时不接收数据
    pub fn devctl(&self, dev: &str, cmd: i32, arg: &[u8], out: &mut [u8]) -> Result<()> {
        let dev = CPath::new(dev)?;
        checked_len(arg)?;
        checked_len(out)?;
        trace!("devctl {:?} cmd={:#x}", dev, cmd);
        check(self.backend.devctl(dev.as_cstr(), cmd, arg, out)).map(|_| ())
    }

    // 查询设备容量。dev可以是设备名，也可以是设备上的任意路径
    pub fn dev_info(&self, dev: &str) -> Result<SceIoDevInfo> {
        let path = CPath::new(dev)?;
        // 只保留"ux0:"部分
        let dev = match path.device() {
            Some(device) => &dev[..device.len() + 1],
            None => dev,
        };
        let mut out = [0u8; SceIoDevInfo::SIZE];
        self.devctl(dev, SCE_IO_DEVCTL_GET_DEV_INFO, &[], &mut out)?;
        SceIoDevInfo::from_bytes(&out).ok_or_else(|| Errno::EIO.into())
    }

    // 将设备上的数据写回存储，flag的含义由设备决定
    pub fn sync(&self, dev: &str, flag: i32) -> Result<()> {
        let dev = CPath::new(dev)?;
        check(self.backend.sync(dev.as_cstr(), flag)).map(|_| ())
    }

    pub fn open(&self, path: &str, flags: OpenFlags, mode: IoMode) -> Result<File> {
        let cpath = CPath::new(path)?;
        if flags.has_reserved() {
            warn!("open {:?} with reserved flags {:?}", path, flags & OpenFlags::RESERVED);
        }
        let fd = check(self.backend.open(cpath.as_cstr(), flags.raw(), mode.raw()))?;
        debug!("open {:?} flags={:#x} -> fd={:#x}", path, flags.raw(), fd);
        Ok(File::from_raw_fd(self.backend.clone(), fd))
    }

    // 内核未实现，总是返回Error::Unsupported
    pub fn devctl_async(
        &self,
        dev: &str,
        cmd: i32,
        arg: &[u8],
        out: &mut [u8],
        param: &mut SceIoAsyncParam,
    ) -> Result<()> {
        let dev = CPath::new(dev)?;
        checked_len(arg)?;
        checked_len(out)?;
        check(self.backend.devctl_async(dev.as_cstr(), cmd, arg, out, param)).map(|_| ())
    }

    // 挂载设备id。path为None时由内核决定挂载点
    pub fn mount(&self, id: i32, path: Option<&str>, permission: i32) -> Result<()> {
        let path = path.map(CPath::new).transpose()?;
        let ret = self.backend.mount(
            id,
            path.as_ref().map(CPath::as_cstr),
            permission,
            MOUNT_RESERVED_ARGS,
        );
        check(ret)?;
        debug!("mount id={:#x} at {:?} permission={:#x}", id, path, permission);
        Ok(())
    }

    pub fn umount(&self, id: i32) -> Result<()> {
        check(self.backend.umount(id, MOUNT_RESERVED_ARGS))?;
        debug!("umount id={:#x}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::error::Error;
    use crate::mock::{Call, MockBackend, Reply};
    use alloc::string::String;

    fn manager() -> (Arc<MockBackend>, IoManager) {
        let mock = Arc::new(MockBackend::new());
        let manager = IoManager::new(mock.clone());
        (mock, manager)
    }

    #[test]
    fn open_returns_descriptor() {
        let (mock, manager) = manager();
        mock.push_reply(Reply::Code(0x0001_0005));
        let file = manager
            .open("ux0:data/a.bin", OpenFlags::WRONLY | OpenFlags::CREAT, IoMode::all())
            .unwrap();
        assert_eq!(file.fd(), 0x0001_0005);
        assert_eq!(
            mock.calls()[0],
            Call::Open {
                path: String::from("ux0:data/a.bin"),
                flags: SCE_O_WRONLY | SCE_O_CREAT,
                mode: 0o777
            }
        );
    }

    #[test]
    fn open_error_code() {
        let (mock, manager) = manager();
        mock.push_reply(Reply::Code(Errno::EMFILE.code() as i32 as i64));
        let err = manager
            .open("ux0:data/a.bin", OpenFlags::RDONLY, IoMode::all())
            .unwrap_err();
        assert_eq!(err, Error::Errno(Errno::EMFILE));
        // 打开失败时不应关闭任何描述符
        assert_eq!(mock.calls().len(), 1);
    }

    #[test]
    fn too_long_path_never_reaches_backend() {
        let (mock, manager) = manager();
        let path = "ux0:".repeat(60);
        assert_eq!(
            manager.remove(&path),
            Err(Error::Errno(Errno::ENAMETOOLONG))
        );
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn path_operations() {
        let (mock, manager) = manager();
        manager.mkdir("ux0:data/dir", IoMode::IRWXU).unwrap();
        manager.rename("ux0:data/a", "ux0:data/b").unwrap();
        manager.remove("ux0:data/b").unwrap();
        manager.rmdir("ux0:data/dir").unwrap();
        manager.sync("ux0:", 0).unwrap();
        assert_eq!(
            mock.take_calls(),
            [
                Call::Mkdir {
                    path: String::from("ux0:data/dir"),
                    mode: SCE_S_IRWXU
                },
                Call::Rename {
                    old: String::from("ux0:data/a"),
                    new: String::from("ux0:data/b")
                },
                Call::Remove {
                    path: String::from("ux0:data/b")
                },
                Call::Rmdir {
                    path: String::from("ux0:data/dir")
                },
                Call::Sync {
                    dev: String::from("ux0:"),
                    flag: 0
                },
            ]
        );
    }

    #[test]
    fn dev_info_uses_device_of_path() {
        let (mock, manager) = manager();
        let expected = SceIoDevInfo {
            max_size: 16 << 30,
            free_size: 4 << 30,
            cluster_size: 32 * 1024,
            ..Default::default()
        };
        mock.push_reply(Reply::Data(expected.to_bytes().to_vec()));
        let info = manager.dev_info("ux0:data/a.bin").unwrap();
        assert_eq!(info.max_size, expected.max_size);
        assert_eq!(info.free_size, expected.free_size);
        assert_eq!(info.cluster_size, expected.cluster_size);
        assert_eq!(
            mock.calls()[0],
            Call::Devctl {
                dev: String::from("ux0:"),
                cmd: SCE_IO_DEVCTL_GET_DEV_INFO,
                arg: vec![],
                out_len: SceIoDevInfo::SIZE,
            }
        );
    }

    #[test]
    fn devctl_async_is_unsupported() {
        let (_, manager) = manager();
        let mut param = SceIoAsyncParam::default();
        assert_eq!(
            manager.devctl_async("ux0:", 0x3001, &[], &mut [], &mut param),
            Err(Error::Unsupported)
        );
    }

    #[test]
    fn mount_and_umount() {
        let (mock, manager) = manager();
        manager.mount(0x800, None, 2).unwrap();
        manager.mount(0xF00, Some("uma0:"), 0).unwrap();
        manager.umount(0x800).unwrap();
        assert_eq!(
            mock.take_calls(),
            [
                Call::Mount {
                    id: 0x800,
                    path: None,
                    permission: 2,
                    args: [0, 0, 0]
                },
                Call::Mount {
                    id: 0xF00,
                    path: Some(String::from("uma0:")),
                    permission: 0,
                    args: [0, 0, 0]
                },
                Call::Umount {
                    id: 0x800,
                    args: [0, 0, 0]
                },
            ]
        );
    }
}
