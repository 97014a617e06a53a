mod attendance;
mod mvp;

pub use attendance::AttendanceCollector;
pub use mvp::MvpCollector;
