/// Description used for any status code missing from the table below.
pub const UNKNOWN_STATUS_DESCRIPTION: &str = "Unknown - Kode status tidak dikenali.";

/// Description used when a probe never received a response.
pub const UNREACHABLE_DESCRIPTION: &str =
    "Tidak Dapat Dihubungi - Situs tidak aktif atau tidak tersedia.";

/// Returns the human-readable description for an HTTP status code.
pub fn describe(code: u16) -> &'static str {
    match code {
        200 => "OK - Permintaan berhasil diproses.",
        201 => "Created - Sumber daya baru berhasil dibuat.",
        400 => "Bad Request - Permintaan tidak valid atau salah format.",
        401 => "Unauthorized - Akses ditolak karena autentikasi gagal.",
        403 => "Forbidden - Akses ditolak karena tidak memiliki izin.",
        404 => "Not Found - Sumber daya yang diminta tidak ditemukan.",
        500 => "Internal Server Error - Terjadi kesalahan di server.",
        503 => "Service Unavailable - Server sedang tidak tersedia.",
        _ => UNKNOWN_STATUS_DESCRIPTION,
    }
}
