//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in-process: an in-memory video store, an `InMemory`
//! object store for published videos and fake media tools.

#![allow(dead_code)]

pub mod fixtures;
pub mod tools;

use axum_test::TestServer;
use object_store::memory::InMemory;
use reelhouse_api::auth::JwtService;
use reelhouse_api::setup::routes;
use reelhouse_api::state::AppState;
use reelhouse_core::constants::{API_PREFIX, MAX_THUMBNAIL_UPLOAD_BYTES};
use reelhouse_core::models::{UploadKind, VideoRecord};
use reelhouse_core::{
    BaseConfig, Config, DatabaseConfig, MediaConfig, PublisherKind, StorageBackend, StorageConfig,
};
use reelhouse_db::{InMemoryVideoStore, VideoStore};
use reelhouse_processing::{IngestionOrchestrator, ScratchDir, ThumbnailService, UploadValidator};
use reelhouse_storage::{
    AssetCache, DataUrlPublisher, MemoryPublisher, ObjectStorePublisher, Publisher,
};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const PUBLIC_BASE_URL: &str = "http://localhost:8091";
pub const CDN_BASE_URL: &str = "https://reelhouse-media.s3.us-east-2.amazonaws.com";

/// Video size limit used by the test app; small enough to exceed cheaply.
pub const TEST_MAX_VIDEO_BYTES: usize = 64 * 1024;

/// API path prefix for tests.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application: server plus handles on the in-memory backends.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub videos: Arc<InMemoryVideoStore>,
    pub video_objects: Arc<InMemory>,
    pub prober: Arc<tools::FakeProber>,
    pub _scratch_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state.jwt.issue(user_id).unwrap()
    }

    pub fn bearer(&self, user_id: Uuid) -> String {
        format!("Bearer {}", self.token_for(user_id))
    }

    /// Insert a video record owned by `owner` with no media yet.
    pub async fn seed_video(&self, owner: Uuid) -> VideoRecord {
        let video = VideoRecord::new(owner, "Launch demo");
        self.videos.insert(&video).await.unwrap();
        video
    }

    pub async fn stored_video(&self, id: Uuid) -> VideoRecord {
        self.videos.get(id).await.unwrap().unwrap()
    }

    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self._scratch_dir.path()).unwrap().count()
    }
}

pub fn test_config(scratch_dir: &TempDir, thumbnail_publisher: PublisherKind) -> Config {
    Config {
        base: BaseConfig {
            server_port: 8091,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
            public_base_url: PUBLIC_BASE_URL.to_string(),
        },
        database: DatabaseConfig {
            database_url: None,
            max_connections: 1,
            timeout_seconds: 5,
        },
        storage: StorageConfig {
            backend: StorageBackend::S3,
            s3_bucket: Some("reelhouse-media".to_string()),
            s3_region: Some("us-east-2".to_string()),
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            local_storage_base_url: None,
            thumbnail_publisher,
            thumbnail_cache_capacity: 16,
        },
        media: MediaConfig {
            scratch_dir: scratch_dir.path().to_path_buf(),
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            tool_timeout_secs: 5,
            max_video_size_bytes: TEST_MAX_VIDEO_BYTES,
            max_thumbnail_size_bytes: MAX_THUMBNAIL_UPLOAD_BYTES,
        },
    }
}

/// Setup test app with the memory thumbnail publisher.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(PublisherKind::Memory).await
}

pub async fn setup_test_app_with(thumbnail_publisher: PublisherKind) -> TestApp {
    let scratch_dir = tempfile::tempdir().unwrap();
    let config = test_config(&scratch_dir, thumbnail_publisher);

    let videos = Arc::new(InMemoryVideoStore::new());
    let video_objects = Arc::new(InMemory::new());
    let asset_cache = Arc::new(AssetCache::new(config.storage.thumbnail_cache_capacity));
    let prober = Arc::new(tools::FakeProber::new());

    let video_publisher = Arc::new(ObjectStorePublisher::with_store(
        video_objects.clone(),
        CDN_BASE_URL,
    ));
    let thumbnail_publisher: Arc<dyn Publisher> = match thumbnail_publisher {
        PublisherKind::Memory => Arc::new(MemoryPublisher::new(
            asset_cache.clone(),
            PUBLIC_BASE_URL,
        )),
        PublisherKind::DataUrl => Arc::new(DataUrlPublisher::new()),
        PublisherKind::ObjectStore => video_publisher.clone(),
    };

    let scratch = ScratchDir::new(scratch_dir.path());
    let ingestion = IngestionOrchestrator::new(
        videos.clone(),
        prober.clone(),
        Arc::new(tools::FakeRepackager),
        video_publisher,
        scratch.clone(),
        UploadValidator::new(UploadKind::Video, config.media.max_video_size_bytes),
    );
    let thumbnails = ThumbnailService::new(
        videos.clone(),
        thumbnail_publisher,
        scratch,
        UploadValidator::new(UploadKind::Thumbnail, config.media.max_thumbnail_size_bytes),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: videos.clone(),
        ingestion: Arc::new(ingestion),
        thumbnails: Arc::new(thumbnails),
        asset_cache,
        jwt: JwtService::new(TEST_JWT_SECRET, 1),
    });

    let router = routes::setup_routes(&config, state.clone()).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        state,
        videos,
        video_objects,
        prober,
        _scratch_dir: scratch_dir,
    }
}
