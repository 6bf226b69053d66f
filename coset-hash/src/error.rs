/// 字节哈希与熵源辅助函数的错误。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 随机源未能填满请求的字节数。
    #[error("error generating {requested} bytes of entropy: {source}")]
    Entropy {
        requested: u32,
        #[source]
        source: rand_core::Error,
    },
}
