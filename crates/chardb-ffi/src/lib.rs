//! C FFI bindings for chardb-core
//!
//! This crate provides a C-compatible API for a presentation layer that renders
//! the catalog itself. Cells are served in export column order.

use chardb_core::{BeastFilter, Catalog, ExportRow, SortField};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Opaque handle to a catalog
pub struct FfiCatalog {
    inner: Catalog,
}

/// Create an empty catalog
///
/// The caller must free it with `chardb_catalog_free`.
#[no_mangle]
pub extern "C" fn chardb_catalog_new() -> *mut FfiCatalog {
    Box::into_raw(Box::new(FfiCatalog {
        inner: Catalog::default(),
    }))
}

/// Free a catalog
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new` or null
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_free(catalog: *mut FfiCatalog) {
    if !catalog.is_null() {
        drop(Box::from_raw(catalog));
    }
}

/// Replace the catalog contents with records parsed from `text`
///
/// Returns the number of records loaded, or -1 if a pointer is null or the
/// text is not valid UTF-8 (the catalog is then left unchanged).
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new`
/// - `text` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_load_text(catalog: *mut FfiCatalog, text: *const c_char) -> i64 {
    if catalog.is_null() || text.is_null() {
        return -1;
    }

    match CStr::from_ptr(text).to_str() {
        Ok(text) => (*catalog).inner.load_text(text) as i64,
        Err(_) => -1,
    }
}

/// Sort by a field index (export column order: name, damage, defense,
/// energy rate, move speed, average, beast)
///
/// Sorting the active field again flips direction. Returns 1 for ascending,
/// -1 for descending, 0 if the index is out of range.
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new`
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_sort(catalog: *mut FfiCatalog, field: usize) -> i32 {
    if catalog.is_null() {
        return 0;
    }

    match SortField::ALL.get(field) {
        Some(&field) => match (*catalog).inner.sort(field).direction {
            chardb_core::SortDirection::Ascending => 1,
            chardb_core::SortDirection::Descending => -1,
        },
        None => 0,
    }
}

/// Set the beast filter toggles
///
/// `show_beasts = false` wins over `only_beasts = true`: the combination
/// shows all non-beasts.
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new`
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_set_filter(catalog: *mut FfiCatalog, show_beasts: bool, only_beasts: bool) {
    if catalog.is_null() {
        return;
    }

    (*catalog).inner.view.filter = BeastFilter {
        show_beasts,
        only_beasts,
    };
}

/// Get the number of records passing the current filter
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new`
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_visible_count(catalog: *const FfiCatalog) -> usize {
    if catalog.is_null() {
        return 0;
    }
    (*catalog).inner.visible().len()
}

/// Get a visible cell as a string
///
/// # Safety
/// - `catalog` must be a valid pointer returned by `chardb_catalog_new`
/// - Returns null if row or col is out of bounds
/// - Caller must free the returned string with `chardb_free_string`
#[no_mangle]
pub unsafe extern "C" fn chardb_catalog_cell(catalog: *const FfiCatalog, row: usize, col: usize) -> *mut c_char {
    if catalog.is_null() {
        return ptr::null_mut();
    }

    (*catalog)
        .inner
        .visible()
        .get(row)
        .map(|record| ExportRow::from(*record))
        .and_then(|export| export.cell(col))
        .and_then(|s| CString::new(s).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a chardb_* function or null
#[no_mangle]
pub unsafe extern "C" fn chardb_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &[u8] = b"Character \"Wolf\": Damage: 10, Defense: 5, Energy Rate: 3, Move Speed: 7, Beast: True\n\
Character \"Wolf\": Damage: 20, Defense: 15, Energy Rate: 13, Move Speed: 17, Beast: True\n\
Character \"Cat\": Damage: 8, Defense: 8, Energy Rate: 8, Move Speed: 8, Beast: False\n\0";

    unsafe fn cell(catalog: *const FfiCatalog, row: usize, col: usize) -> Option<String> {
        let raw = chardb_catalog_cell(catalog, row, col);
        if raw.is_null() {
            return None;
        }
        let value = CStr::from_ptr(raw).to_str().unwrap().to_string();
        chardb_free_string(raw);
        Some(value)
    }

    #[test]
    fn test_catalog_roundtrip() {
        unsafe {
            let catalog = chardb_catalog_new();
            let text = CStr::from_bytes_with_nul(DB).unwrap();

            assert_eq!(chardb_catalog_load_text(catalog, text.as_ptr()), 3);
            assert_eq!(chardb_catalog_visible_count(catalog), 3);
            assert_eq!(cell(catalog, 0, 0).as_deref(), Some("Wolf (Form 1)"));

            // average, descending after two sorts
            assert_eq!(chardb_catalog_sort(catalog, 5), 1);
            assert_eq!(chardb_catalog_sort(catalog, 5), -1);
            assert_eq!(cell(catalog, 0, 5).as_deref(), Some("16.25"));

            chardb_catalog_set_filter(catalog, false, false);
            assert_eq!(chardb_catalog_visible_count(catalog), 1);
            assert_eq!(cell(catalog, 0, 0).as_deref(), Some("Cat"));
            assert_eq!(cell(catalog, 1, 0), None);
            assert_eq!(cell(catalog, 0, 7), None);

            chardb_catalog_free(catalog);
        }
    }

    #[test]
    fn test_hide_beasts_wins_over_only_beasts() {
        unsafe {
            let catalog = chardb_catalog_new();
            let text = CStr::from_bytes_with_nul(DB).unwrap();
            chardb_catalog_load_text(catalog, text.as_ptr());

            chardb_catalog_set_filter(catalog, false, true);
            assert_eq!(chardb_catalog_visible_count(catalog), 1);
            assert_eq!(cell(catalog, 0, 0).as_deref(), Some("Cat"));
            assert_eq!(cell(catalog, 0, 6).as_deref(), Some("No"));

            chardb_catalog_set_filter(catalog, true, true);
            assert_eq!(chardb_catalog_visible_count(catalog), 2);
            assert_eq!(cell(catalog, 0, 6).as_deref(), Some("Yes"));

            chardb_catalog_set_filter(catalog, true, false);
            assert_eq!(chardb_catalog_visible_count(catalog), 3);

            chardb_catalog_free(catalog);
        }
    }

    #[test]
    fn test_null_handles() {
        unsafe {
            assert_eq!(chardb_catalog_load_text(ptr::null_mut(), ptr::null()), -1);
            assert_eq!(chardb_catalog_sort(ptr::null_mut(), 0), 0);
            assert_eq!(chardb_catalog_visible_count(ptr::null()), 0);
            assert!(chardb_catalog_cell(ptr::null(), 0, 0).is_null());
            chardb_catalog_free(ptr::null_mut());
        }
    }
}
