/// 计算单张试卷的目标题量
///
/// `target = round(base * weight_percent / 100)`，四舍五入（.5 远离零）。
/// 各卷独立取整，不做跨卷归一化。权重为 0、负数或非有限值时目标为 0。
pub fn target_for(base: usize, weight_percent: f64) -> usize {
    if !weight_percent.is_finite() || weight_percent <= 0.0 {
        return 0;
    }
    let raw = (base as f64 * weight_percent / 100.0).round();
    if raw.is_finite() && raw > 0.0 {
        raw as usize
    } else {
        0
    }
}
