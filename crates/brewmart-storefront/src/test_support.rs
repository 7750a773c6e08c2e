//! In-memory `StoreApi` used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use brewmart_client::{ClientError, ProductPage, StoreApi};
use brewmart_core::{Cart, CartLine, Product, ProductMetadata, PROVENANCE_LABEL};
use rust_decimal::Decimal;
use tokio::sync::Semaphore;

pub(crate) fn product(id: &str, price_cents: i64) -> Product {
    Product {
        id: id.to_owned(),
        name: format!("bean-{id}"),
        price: Decimal::new(price_cents, 2),
        stock: 3,
        hidden: false,
        metadata: Some(ProductMetadata {
            image: Some(format!("Qm{id}")),
            origin: Some("Huila".to_owned()),
            ..ProductMetadata::default()
        }),
        provenance: PROVENANCE_LABEL.to_owned(),
    }
}

pub(crate) fn hidden(mut p: Product) -> Product {
    p.hidden = true;
    p
}

pub(crate) fn page(products: Vec<Product>, next: Option<&str>) -> ProductPage {
    ProductPage {
        products,
        next_cursor: next.map(str::to_owned),
    }
}

fn unavailable() -> ClientError {
    ClientError::UnexpectedStatus {
        status: 503,
        url: "http://fake/products".to_owned(),
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    /// Pages keyed by the cursor that requests them (`None` = first page).
    pages: Mutex<HashMap<Option<String>, ProductPage>>,
    search_results: Mutex<HashMap<String, Vec<Product>>>,
    cart: Mutex<Cart>,
    /// When set, every listing call waits for one permit.
    gate: Option<Arc<Semaphore>>,
    pub(crate) fail_listing: AtomicBool,
    pub(crate) fail_search: AtomicBool,
    pub(crate) fail_add: AtomicBool,
    pub(crate) list_calls: AtomicUsize,
    pub(crate) cart_reads: AtomicUsize,
    pub(crate) adds: Mutex<Vec<(String, u32)>>,
    pub(crate) cursors_requested: Mutex<Vec<Option<String>>>,
}

impl FakeApi {
    pub(crate) fn with_pages(pages: Vec<(Option<&str>, ProductPage)>) -> Self {
        let api = Self::default();
        {
            let mut map = api.pages.lock().unwrap();
            for (cursor, page) in pages {
                map.insert(cursor.map(str::to_owned), page);
            }
        }
        api
    }

    /// Listing calls block until the returned semaphore gets permits.
    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub(crate) fn with_search(self, query: &str, results: Vec<Product>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_owned(), results);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn cart_reads(&self) -> usize {
        self.cart_reads.load(Ordering::SeqCst)
    }

    pub(crate) fn adds(&self) -> Vec<(String, u32)> {
        self.adds.lock().unwrap().clone()
    }
}

impl StoreApi for FakeApi {
    async fn list_products(
        &self,
        _limit: u32,
        exclude_hidden: bool,
        cursor: Option<&str>,
    ) -> Result<ProductPage, ClientError> {
        assert!(exclude_hidden, "catalog must always ask the API to drop hidden items");
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors_requested
            .lock()
            .unwrap()
            .push(cursor.map(str::to_owned));
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let pages = self.pages.lock().unwrap();
        Ok(pages
            .get(&cursor.map(str::to_owned))
            .cloned()
            .unwrap_or_default())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_cart(&self) -> Result<Cart, ClientError> {
        self.cart_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.cart.lock().unwrap().clone())
    }

    async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<(), ClientError> {
        tokio::task::yield_now().await;
        self.adds
            .lock()
            .unwrap()
            .push((product_id.to_owned(), quantity));
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.cart.lock().unwrap().items.push(CartLine {
            product_id: product_id.to_owned(),
            quantity,
        });
        Ok(())
    }
}
