//! Localized (Vietnamese) feedback strings, fixed per action.

/// Toast and dialog texts for one resource family.
#[derive(Debug, Clone, Copy)]
pub struct FamilyMessages {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub confirm_delete: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
}

pub const PATIENTS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách bệnh nhân",
    created: "Thêm bệnh nhân thành công",
    create_failed: "Không thể thêm bệnh nhân",
    updated: "Cập nhật bệnh nhân thành công",
    update_failed: "Không thể cập nhật bệnh nhân",
    confirm_delete: "Bạn có chắc chắn muốn xóa bệnh nhân này?",
    deleted: "Xóa bệnh nhân thành công",
    delete_failed: "Không thể xóa bệnh nhân",
};

pub const APPOINTMENTS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách lịch hẹn",
    created: "Thêm lịch hẹn thành công",
    create_failed: "Không thể thêm lịch hẹn",
    updated: "Cập nhật lịch hẹn thành công",
    update_failed: "Không thể cập nhật lịch hẹn",
    confirm_delete: "Bạn có chắc chắn muốn xóa lịch hẹn này?",
    deleted: "Xóa lịch hẹn thành công",
    delete_failed: "Không thể xóa lịch hẹn",
};

pub const PRESCRIPTIONS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải dữ liệu",
    created: "Thêm đơn thuốc thành công",
    create_failed: "Không thể thêm đơn thuốc",
    updated: "Cập nhật đơn thuốc thành công",
    update_failed: "Không thể cập nhật đơn thuốc",
    confirm_delete: "Bạn có chắc chắn muốn xóa đơn thuốc này?",
    deleted: "Xóa đơn thuốc thành công",
    delete_failed: "Không thể xóa đơn thuốc",
};

pub const LAB_RESULTS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải dữ liệu",
    created: "Thêm kết quả xét nghiệm thành công",
    create_failed: "Không thể thêm kết quả",
    updated: "Cập nhật kết quả xét nghiệm thành công",
    update_failed: "Không thể cập nhật kết quả",
    confirm_delete: "Bạn có chắc chắn muốn xóa kết quả xét nghiệm này?",
    deleted: "Xóa kết quả xét nghiệm thành công",
    delete_failed: "Không thể xóa kết quả xét nghiệm",
};

pub const MEDICATIONS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách thuốc",
    created: "Thêm thuốc thành công",
    create_failed: "Không thể thêm thuốc",
    updated: "Cập nhật thuốc thành công",
    update_failed: "Không thể cập nhật thuốc",
    confirm_delete: "Bạn có chắc chắn muốn xóa thuốc này?",
    deleted: "Xóa thuốc thành công",
    delete_failed: "Không thể xóa thuốc",
};

pub const ARV_REGIMENS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách phác đồ ARV",
    created: "Tạo phác đồ ARV thành công",
    create_failed: "Có lỗi xảy ra khi lưu phác đồ ARV",
    updated: "Cập nhật phác đồ ARV thành công",
    update_failed: "Có lỗi xảy ra khi lưu phác đồ ARV",
    confirm_delete: "Bạn có chắc chắn muốn xóa phác đồ ARV này?",
    deleted: "Xóa phác đồ ARV thành công",
    delete_failed: "Không thể xóa phác đồ ARV",
};

pub const CONSULTATIONS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách tư vấn",
    created: "Tạo yêu cầu tư vấn thành công",
    create_failed: "Có lỗi xảy ra khi tạo yêu cầu tư vấn",
    updated: "Cập nhật yêu cầu tư vấn thành công",
    update_failed: "Không thể cập nhật yêu cầu",
    confirm_delete: "Bạn có chắc chắn muốn xóa yêu cầu tư vấn này?",
    deleted: "Xóa yêu cầu tư vấn thành công",
    delete_failed: "Không thể xóa yêu cầu tư vấn",
};

pub const VITAL_SIGNS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải dữ liệu dấu hiệu sinh tồn",
    created: "Thêm dấu hiệu sinh tồn thành công",
    create_failed: "Không thể thêm dấu hiệu sinh tồn",
    updated: "Cập nhật dấu hiệu sinh tồn thành công",
    update_failed: "Không thể cập nhật",
    confirm_delete: "Bạn có chắc chắn muốn xóa bản ghi này?",
    deleted: "Xóa bản ghi thành công",
    delete_failed: "Không thể xóa bản ghi",
};

pub const SIDE_EFFECTS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải dữ liệu tác dụng phụ",
    created: "Ghi nhận tác dụng phụ thành công",
    create_failed: "Không thể ghi nhận tác dụng phụ",
    updated: "Cập nhật tác dụng phụ thành công",
    update_failed: "Không thể cập nhật",
    confirm_delete: "Bạn có chắc chắn muốn xóa ghi chú này?",
    deleted: "Xóa ghi chú thành công",
    delete_failed: "Không thể xóa ghi chú",
};

pub const TREATMENT_PLANS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải kế hoạch điều trị",
    created: "Tạo kế hoạch điều trị thành công",
    create_failed: "Không thể tạo kế hoạch",
    updated: "Cập nhật kế hoạch điều trị thành công",
    update_failed: "Không thể cập nhật kế hoạch",
    confirm_delete: "Bạn có chắc chắn muốn xóa kế hoạch điều trị này?",
    deleted: "Xóa kế hoạch điều trị thành công",
    delete_failed: "Không thể xóa kế hoạch điều trị",
};

pub const REMINDERS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách nhắc nhở",
    created: "Thêm nhắc nhở thành công",
    create_failed: "Không thể thêm nhắc nhở",
    updated: "Cập nhật nhắc nhở thành công",
    update_failed: "Không thể cập nhật nhắc nhở",
    confirm_delete: "Bạn có chắc chắn muốn xóa nhắc nhở này?",
    deleted: "Xóa nhắc nhở thành công",
    delete_failed: "Không thể xóa nhắc nhở",
};

pub const EDUCATION: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải nội dung giáo dục",
    created: "Thêm nội dung thành công",
    create_failed: "Không thể thêm nội dung",
    updated: "Cập nhật nội dung thành công",
    update_failed: "Không thể cập nhật nội dung",
    confirm_delete: "Bạn có chắc chắn muốn xóa nội dung này?",
    deleted: "Xóa nội dung thành công",
    delete_failed: "Không thể xóa nội dung",
};

pub const USERS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải danh sách người dùng",
    created: "Thêm người dùng thành công",
    create_failed: "Không thể thêm người dùng",
    updated: "Cập nhật người dùng thành công",
    update_failed: "Không thể cập nhật người dùng",
    confirm_delete: "Bạn có chắc chắn muốn xóa người dùng này?",
    deleted: "Xóa người dùng thành công",
    delete_failed: "Không thể xóa người dùng",
};

pub const NOTIFICATIONS: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải thông báo",
    created: "Tạo thông báo thành công",
    create_failed: "Không thể tạo thông báo",
    updated: "Cập nhật thông báo thành công",
    update_failed: "Không thể cập nhật thông báo",
    confirm_delete: "Bạn có chắc chắn muốn xóa thông báo này?",
    deleted: "Xóa thông báo thành công",
    delete_failed: "Không thể xóa thông báo",
};

pub const ADHERENCE: FamilyMessages = FamilyMessages {
    load_failed: "Không thể tải dữ liệu tuân thủ thuốc",
    created: "Đã ghi nhận uống thuốc",
    create_failed: "Không thể ghi nhận tuân thủ",
    updated: "Đã ghi nhận uống thuốc",
    update_failed: "Không thể ghi nhận tuân thủ",
    confirm_delete: "Bạn có chắc chắn muốn xóa bản ghi này?",
    deleted: "Xóa bản ghi thành công",
    delete_failed: "Không thể xóa bản ghi",
};

/// Label for a server value this client does not recognise.
pub const UNKNOWN_VALUE: &str = "Không xác định";

// ── Session ─────────────────────────────────────────────

pub const LOGIN_SUCCESS: &str = "Đăng nhập thành công!";
pub const REGISTER_SUCCESS: &str = "Đăng ký thành công!";
pub const CONFIRM_LOGOUT: &str = "Bạn có chắc chắn muốn đăng xuất?";
pub const PASSWORD_MISMATCH: &str = "Mật khẩu xác nhận không khớp";

// ── Profile ─────────────────────────────────────────────

pub const PROFILE_UPDATED: &str = "Cập nhật thông tin cá nhân thành công";
pub const PROFILE_UPDATE_FAILED: &str = "Không thể cập nhật thông tin cá nhân";
pub const PASSWORD_CHANGED: &str = "Đổi mật khẩu thành công";
pub const PASSWORD_CHANGE_FAILED: &str = "Không thể đổi mật khẩu";

// ── Validation ──────────────────────────────────────────

pub const REQUIRED_FIELD: &str = "Vui lòng điền đầy đủ thông tin bắt buộc";
pub const DATE_RANGE_ORDER: &str = "Ngày kết thúc phải sau ngày bắt đầu";
pub const SELECT_PATIENT: &str = "Vui lòng chọn bệnh nhân";
pub const FORBIDDEN: &str = "Bạn không có quyền thực hiện thao tác này";

// ── Consultations ───────────────────────────────────────

pub const STATUS_UPDATED: &str = "Cập nhật trạng thái thành công";
pub const STATUS_UPDATE_FAILED: &str = "Không thể cập nhật trạng thái";
pub const DOCTOR_ASSIGNED: &str = "Phân công bác sĩ thành công";
pub const DOCTOR_ASSIGN_FAILED: &str = "Không thể phân công bác sĩ";
pub const MESSAGES_LOAD_FAILED: &str = "Không thể tải tin nhắn";
pub const MESSAGE_SEND_FAILED: &str = "Không thể gửi tin nhắn";

// ── Reminders and adherence ─────────────────────────────

pub const DOSE_TAKEN: &str = "Đã ghi nhận uống thuốc";
pub const DOSE_MISSED: &str = "Đã ghi nhận bỏ sót";
pub const DOSE_RECORD_FAILED: &str = "Không thể ghi nhận";

// ── Notifications ───────────────────────────────────────

pub const MARK_READ_FAILED: &str = "Không thể đánh dấu đã đọc";
pub const MARK_ALL_READ: &str = "Đã đánh dấu tất cả thông báo là đã đọc";
pub const MARK_ALL_READ_FAILED: &str = "Không thể đánh dấu tất cả đã đọc";

// ── Admin ───────────────────────────────────────────────

pub const ADMIN_LOAD_FAILED: &str = "Không thể tải dữ liệu admin";
pub const DASHBOARD_LOAD_FAILED: &str = "Không thể tải dữ liệu dashboard";
pub const CONFIRM_RESET_PASSWORD: &str = "Bạn có chắc chắn muốn reset mật khẩu cho người dùng này?";
pub const PASSWORD_RESET: &str = "Reset mật khẩu thành công";
pub const PASSWORD_RESET_FAILED: &str = "Không thể reset mật khẩu";
pub const BACKUP_DONE: &str = "Tạo backup thành công";
pub const MAINTENANCE_TOGGLED: &str = "Chuyển đổi chế độ bảo trì thành công";
pub const CACHE_CLEARED: &str = "Xóa cache thành công";
pub const RESTART_SCHEDULED: &str = "Hệ thống sẽ khởi động lại trong vài phút";
pub const CONFIRM_RESTART: &str = "Bạn có chắc chắn muốn khởi động lại hệ thống?";

// ── Reports ─────────────────────────────────────────────

pub const REPORT_GENERATED: &str = "Tạo báo cáo thành công";
pub const REPORT_FAILED: &str = "Không thể tạo báo cáo";
pub const EXPORT_FAILED: &str = "Không thể xuất báo cáo";

// ── Anonymous booking ───────────────────────────────────

pub const BOOKING_SUCCESS: &str = "Đặt lịch ẩn danh thành công!";
pub const BOOKING_FAILED: &str = "Không thể đặt lịch. Vui lòng thử lại.";
pub const BOOKING_CONSENT_REQUIRED: &str = "Vui lòng đồng ý với các điều khoản";

/// `"Không thể thực hiện {action}"`
pub fn system_action_failed(action: &str) -> String {
    format!("Không thể thực hiện {action}")
}

/// `"Xuất báo cáo PDF thành công"`
pub fn export_done(format: &str) -> String {
    format!("Xuất báo cáo {} thành công", format.to_uppercase())
}
