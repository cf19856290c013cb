//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `CompareHandler` 只负责流程编排与配置管理，不直接与命令行或界面绑定。
//! 处理链路固定为：
//! 1. 校验输入（原图 + 至少一张派生图）
//! 2. 读取配置快照
//! 3. 加载并解码原图
//! 4. 逐张加载派生图并与原图对比（严格串行，保持输入顺序）
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<CompareConfig>>` 支持运行时调整。
//! - 单次批量对比使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录每组 `load/compare` 与整批 `total` 阶段耗时，便于性能诊断。
//! - 加载/解码失败终止整批；空重叠按 `DegeneratePolicy` 处理。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::{
    Bitmap, CompareConfig, CompareError, ComparisonBatch, DegeneratePolicy, ImageSource,
    PairOutcome, compare,
};

/// 图片对比处理器。
pub struct CompareHandler {
    pub(super) config: Arc<RwLock<CompareConfig>>,
}

impl CompareHandler {
    /// 根据初始配置创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use image_diff::image_compare::{CompareConfig, CompareHandler};
    ///
    /// let handler = CompareHandler::new(CompareConfig::default())?;
    /// # Ok::<(), image_diff::image_compare::CompareError>(())
    /// ```
    pub fn new(config: CompareConfig) -> Result<Self, CompareError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次批量对比使用一致参数。
    pub fn config_snapshot(&self) -> Result<CompareConfig, CompareError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| CompareError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 整体替换配置，替换前先校验。
    pub fn update_config(&self, config: CompareConfig) -> Result<(), CompareError> {
        config.validate()?;
        let mut current = self
            .config
            .write()
            .map_err(|_| CompareError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        *current = config;
        Ok(())
    }

    /// 设置空重叠处理策略。
    pub fn set_degenerate_policy(&self, policy: DegeneratePolicy) -> Result<(), CompareError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| CompareError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        config.degenerate_policy = policy;

        log::info!("⚙️ 已切换空重叠处理策略：{}", policy.as_str());

        Ok(())
    }

    pub fn get_degenerate_policy(&self) -> Result<DegeneratePolicy, CompareError> {
        Ok(self.config_snapshot()?.degenerate_policy)
    }

    /// 加载并解码单张图片。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_diff::image_compare::{CompareConfig, CompareHandler, ImageSource};
    ///
    /// # async fn demo() -> Result<(), image_diff::image_compare::CompareError> {
    /// let handler = CompareHandler::new(CompareConfig::default())?;
    /// let bitmap = handler.load(ImageSource::FilePath("/tmp/original.png".into())).await?;
    /// println!("{}x{}", bitmap.width(), bitmap.height());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, source: ImageSource) -> Result<Bitmap, CompareError> {
        let config = self.config_snapshot()?;
        self.load_with_config(source, &config).await
    }

    async fn load_with_config(
        &self,
        source: ImageSource,
        config: &CompareConfig,
    ) -> Result<Bitmap, CompareError> {
        let raw = self.load_raw(source, config)?;
        Self::decode_with_timeout(raw, config).await
    }

    /// 批量对比主入口：一张原图对多张派生图。
    ///
    /// 返回的批次长度等于 `derived.len()`，顺序与输入一致。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_diff::image_compare::{CompareConfig, CompareHandler, ImageSource};
    ///
    /// # async fn demo() -> Result<(), image_diff::image_compare::CompareError> {
    /// let handler = CompareHandler::new(CompareConfig::default())?;
    /// let batch = handler
    ///     .compare_batch(
    ///         ImageSource::FilePath("/tmp/original.png".into()),
    ///         vec![ImageSource::FilePath("/tmp/derived.png".into())],
    ///     )
    ///     .await?;
    /// assert_eq!(batch.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn compare_batch(
        &self,
        original: ImageSource,
        derived: Vec<ImageSource>,
    ) -> Result<ComparisonBatch, CompareError> {
        if derived.is_empty() {
            return Err(CompareError::EmptyInput);
        }

        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let original_label = original.label();
        let load_start = Instant::now();
        let original = Arc::new(self.load_with_config(original, &config).await?);
        log::info!(
            "🖼️ 原图加载完成 - {} {}x{} load={}ms",
            original_label,
            original.width(),
            original.height(),
            load_start.elapsed().as_millis()
        );

        let count = derived.len();
        let mut batch = ComparisonBatch::with_capacity(count);

        for (index, source) in derived.into_iter().enumerate() {
            let label = source.label();

            let load_start = Instant::now();
            let bitmap = Arc::new(self.load_with_config(source, &config).await?);
            let load_elapsed = load_start.elapsed();

            let compare_start = Instant::now();
            let outcome = Self::compare_pair(&original, bitmap, config.degenerate_policy, index)?;
            let compare_elapsed = compare_start.elapsed();

            log::info!(
                "✅ 第 {}/{} 组对比完成 - {} load={}ms compare={}ms",
                index + 1,
                count,
                label,
                load_elapsed.as_millis(),
                compare_elapsed.as_millis()
            );

            batch.push(outcome);
        }

        log::info!(
            "📊 批量对比完成 - 共 {} 组（空重叠 {} 组）total={}ms",
            batch.len(),
            batch.degenerate_count(),
            total_start.elapsed().as_millis()
        );

        Ok(batch)
    }

    /// 对比单组并按策略处理空重叠。
    fn compare_pair(
        original: &Arc<Bitmap>,
        derived: Arc<Bitmap>,
        policy: DegeneratePolicy,
        index: usize,
    ) -> Result<PairOutcome, CompareError> {
        match compare(Arc::clone(original), Arc::clone(&derived)) {
            Ok(result) => Ok(PairOutcome::Compared(result)),
            Err(err @ CompareError::DegenerateOverlap { .. }) => match policy {
                DegeneratePolicy::Abort => Err(err),
                DegeneratePolicy::Report => {
                    log::warn!("⚠️ 第 {} 组重叠区域为空，已记录并继续：{}", index + 1, err);
                    Ok(PairOutcome::Degenerate {
                        original: Arc::clone(original),
                        derived,
                    })
                }
            },
            Err(err) => Err(err),
        }
    }
}
