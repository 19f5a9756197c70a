use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// Fixed local storage key a value is persisted under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

/// Missing, unreadable or malformed entries all fall back to the default value.
impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        load_or_default(local_storage_available())
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        save(self, local_storage_available());
    }
}

/// `LocalStorage` throws instead of returning an error when storage is blocked or missing, so check first.
fn local_storage_available() -> bool {
    storage_usable(gloo::utils::window().local_storage())
}

fn storage_usable(storage: Result<Option<web_sys::Storage>, JsValue>) -> bool {
    match storage {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(err) => {
            log::debug!("local storage is blocked: {:?}", err);
            false
        }
    }
}

fn load_or_default<T: StorageKey + DeserializeOwned + Default>(available: bool) -> T {
    if !available {
        log::debug!("local storage unavailable, using default {:?}", T::KEY);
        return T::default();
    }
    LocalStorage::get(T::KEY).unwrap_or_else(|err| {
        log::debug!("no usable {:?} in local storage: {}", T::KEY, err);
        Default::default()
    })
}

fn save<T: StorageKey + Serialize>(value: &T, available: bool) {
    if !available {
        log::warn!("local storage unavailable, {:?} is kept in memory only", T::KEY);
        return;
    }
    if let Err(err) = LocalStorage::set(T::KEY, value) {
        log::error!("Could not save {:?} to local storage: {:?}", T::KEY, err);
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        // grid area caps real scores well below this
        1000.. => num.to_string(),
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::settings::HighScore;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn blocked_or_missing_storage_is_not_usable() {
        assert!(!storage_usable(Err(JsValue::from_str("SecurityError"))));
        assert!(!storage_usable(Ok(None)));
        assert!(local_storage_available());
    }

    #[wasm_bindgen_test]
    fn unavailable_storage_falls_back_to_memory() {
        LocalStorage::set(HighScore::KEY, HighScore(70)).unwrap();

        assert_eq!(load_or_default::<HighScore>(false), HighScore(0));
        save(&HighScore(90), false);
        assert_eq!(load_or_default::<HighScore>(true), HighScore(70));

        LocalStorage::delete(HighScore::KEY);
    }
}
