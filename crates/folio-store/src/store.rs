// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Project, page, and chapter store backed by SQLite.
//
// Page numbers are unique per project. Renumbering therefore moves every
// affected page to a temporary negative number first and only then to its
// final number, all inside one transaction.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, instrument, warn};

use folio_chapters::ReorganizationSink;
use folio_core::error::{FolioError, Result};
use folio_core::types::{
    Chapter, ChapterId, ChapterType, Page, PageAssignment, PageId, ProjectId, ProjectInfo,
    ProjectType,
};

const CREATE_TABLES_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        project_type TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS pages (
        id TEXT PRIMARY KEY,
        project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        page_number INTEGER NOT NULL,
        extracted_text TEXT,
        edited_text TEXT,
        photo_url TEXT,
        UNIQUE (project_id, page_number)
    );
    CREATE TABLE IF NOT EXISTS chapters (
        id TEXT PRIMARY KEY,
        project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        start_page_number INTEGER NOT NULL,
        end_page_number INTEGER,
        chapter_type TEXT NOT NULL,
        description TEXT,
        ord INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS chapters_by_project ON chapters (project_id, ord);
"#;

/// Folio's SQLite store.
///
/// The connection is guarded by a mutex so one store can be shared (via
/// `Arc`) with the concurrent chapter writer. All methods block; call them
/// from `tokio::task::spawn_blocking` in async code.
pub struct ProjectStore {
    conn: Mutex<Connection>,
}

impl ProjectStore {
    /// Open (or create) the database at `path` in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| FolioError::Storage(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| FolioError::Storage(format!("WAL pragma: {e}")))?;

        let store = Self::init(conn)?;
        info!("project store opened");
        Ok(store)
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FolioError::Storage(format!("open in-memory: {e}")))?;
        let store = Self::init(conn)?;
        debug!("in-memory project store opened");
        Ok(store)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| FolioError::Storage(format!("foreign_keys pragma: {e}")))?;
        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| FolioError::Storage(format!("create tables: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FolioError::Storage("connection lock poisoned".into()))
    }

    /// Insert a project, or update title, description, and type if it exists.
    #[instrument(skip(self, project), fields(project_id = %project.id))]
    pub fn upsert_project(&self, project: &ProjectInfo) -> Result<()> {
        self.conn()?
            .execute(
                "INSERT INTO projects (id, title, description, project_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    project_type = excluded.project_type",
                params![
                    project.id.as_str(),
                    project.title,
                    project.description,
                    project.project_type.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| FolioError::Storage(format!("upsert project: {e}")))?;

        info!(project_id = %project.id, "project saved");
        Ok(())
    }

    /// Returns `None` if the project does not exist.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub fn get_project(&self, project_id: &ProjectId) -> Result<Option<ProjectInfo>> {
        self.conn()?
            .query_row(
                "SELECT id, title, description, project_type FROM projects WHERE id = ?1",
                params![project_id.as_str()],
                row_to_project,
            )
            .optional()
            .map_err(|e| FolioError::Storage(format!("get project: {e}")))
    }

    /// Like [`get_project`](Self::get_project) but a missing project is an
    /// error.
    pub fn require_project(&self, project_id: &ProjectId) -> Result<ProjectInfo> {
        self.get_project(project_id)?
            .ok_or_else(|| FolioError::ProjectNotFound(project_id.to_string()))
    }

    #[instrument(skip(self, page), fields(page_id = %page.id, page_number = page.page_number))]
    pub fn insert_page(&self, project_id: &ProjectId, page: &Page) -> Result<()> {
        self.conn()?
            .execute(
                "INSERT INTO pages (id, project_id, page_number, extracted_text, edited_text, photo_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    page.id.as_str(),
                    project_id.as_str(),
                    page.page_number,
                    page.extracted_text,
                    page.edited_text,
                    page.photo_url,
                ],
            )
            .map_err(|e| FolioError::Storage(format!("insert page {}: {e}", page.id)))?;
        Ok(())
    }

    /// Replace all pages of a project in one transaction.
    ///
    /// Existing chapters are removed too, since their page ranges no longer
    /// refer to anything.
    #[instrument(skip(self, pages), fields(project_id = %project_id, pages = pages.len()))]
    pub fn import_pages(&self, project_id: &ProjectId, pages: &[Page]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| FolioError::Storage(format!("begin import: {e}")))?;

        tx.execute(
            "DELETE FROM chapters WHERE project_id = ?1",
            params![project_id.as_str()],
        )
        .map_err(|e| FolioError::Storage(format!("clear chapters: {e}")))?;
        tx.execute(
            "DELETE FROM pages WHERE project_id = ?1",
            params![project_id.as_str()],
        )
        .map_err(|e| FolioError::Storage(format!("clear pages: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO pages (id, project_id, page_number, extracted_text, edited_text, photo_url)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| FolioError::Storage(format!("prepare import: {e}")))?;
            for page in pages {
                stmt.execute(params![
                    page.id.as_str(),
                    project_id.as_str(),
                    page.page_number,
                    page.extracted_text,
                    page.edited_text,
                    page.photo_url,
                ])
                .map_err(|e| FolioError::Storage(format!("import page {}: {e}", page.id)))?;
            }
        }

        tx.commit()
            .map_err(|e| FolioError::Storage(format!("commit import: {e}")))?;
        info!(count = pages.len(), "pages imported");
        Ok(pages.len())
    }

    /// All pages of a project in page-number order.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub fn get_pages(&self, project_id: &ProjectId) -> Result<Vec<Page>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, page_number, extracted_text, edited_text, photo_url
                 FROM pages WHERE project_id = ?1 ORDER BY page_number ASC",
            )
            .map_err(|e| FolioError::Storage(format!("prepare get_pages: {e}")))?;

        let pages = stmt
            .query_map(params![project_id.as_str()], row_to_page)
            .map_err(|e| FolioError::Storage(format!("query get_pages: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FolioError::Storage(format!("collect rows: {e}")))?;

        debug!(count = pages.len(), "retrieved pages");
        Ok(pages)
    }

    /// All chapters of a project in reading order.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub fn get_chapters(&self, project_id: &ProjectId) -> Result<Vec<Chapter>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, project_id, title, start_page_number, end_page_number,
                        chapter_type, description, ord
                 FROM chapters WHERE project_id = ?1 ORDER BY ord ASC",
            )
            .map_err(|e| FolioError::Storage(format!("prepare get_chapters: {e}")))?;

        let chapters = stmt
            .query_map(params![project_id.as_str()], row_to_chapter)
            .map_err(|e| FolioError::Storage(format!("query get_chapters: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FolioError::Storage(format!("collect rows: {e}")))?;

        debug!(count = chapters.len(), "retrieved chapters");
        Ok(chapters)
    }
}

impl ReorganizationSink for ProjectStore {
    #[instrument(skip(self, assignments), fields(project_id = %project_id, assignments = assignments.len()))]
    fn replace_page_numbers(
        &self,
        project_id: &ProjectId,
        assignments: &[PageAssignment],
    ) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| FolioError::Storage(format!("begin renumber: {e}")))?;

        // Phase 1: park each page on -(new number). New numbers are distinct,
        // so the parked values are too, and none collide with live numbers.
        for a in assignments {
            let rows = tx
                .execute(
                    "UPDATE pages SET page_number = ?1 WHERE id = ?2 AND project_id = ?3",
                    params![-i64::from(a.new_page_number), a.page_id.as_str(), project_id.as_str()],
                )
                .map_err(|e| FolioError::Storage(format!("park page {}: {e}", a.page_id)))?;
            if rows == 0 {
                warn!(page_id = %a.page_id, "renumber target not in project, rolling back");
                return Err(FolioError::UnknownPage(a.page_id.to_string()));
            }
        }

        // Phase 2: flip to the final numbers.
        tx.execute(
            "UPDATE pages SET page_number = -page_number
             WHERE project_id = ?1 AND page_number < 0",
            params![project_id.as_str()],
        )
        .map_err(|e| FolioError::Storage(format!("apply page numbers: {e}")))?;

        tx.commit()
            .map_err(|e| FolioError::Storage(format!("commit renumber: {e}")))?;

        info!(updated = assignments.len(), "page numbers replaced");
        Ok(assignments.len())
    }

    #[instrument(skip(self), fields(project_id = %project_id))]
    fn delete_chapters(&self, project_id: &ProjectId) -> Result<usize> {
        let removed = self
            .conn()?
            .execute(
                "DELETE FROM chapters WHERE project_id = ?1",
                params![project_id.as_str()],
            )
            .map_err(|e| FolioError::Storage(format!("delete chapters: {e}")))?;
        debug!(removed, "chapters deleted");
        Ok(removed)
    }

    #[instrument(skip(self, chapter), fields(chapter_id = %chapter.id, title = %chapter.title))]
    fn insert_chapter(&self, chapter: &Chapter) -> Result<()> {
        self.conn()?
            .execute(
                "INSERT INTO chapters (id, project_id, title, start_page_number, end_page_number,
                 chapter_type, description, ord)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    chapter.id.to_string(),
                    chapter.project_id.as_str(),
                    chapter.title,
                    chapter.start_page_number,
                    chapter.end_page_number,
                    chapter.chapter_type.as_str(),
                    chapter.description,
                    chapter.order,
                ],
            )
            .map_err(|e| FolioError::Storage(format!("insert chapter: {e}")))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn conversion_error(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectInfo> {
    let id: String = row.get(0)?;
    let project_type: String = row.get(3)?;
    Ok(ProjectInfo {
        id: ProjectId(id),
        title: row.get(1)?,
        description: row.get(2)?,
        project_type: ProjectType::parse(Some(project_type.as_str())),
    })
}

fn row_to_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<Page> {
    let id: String = row.get(0)?;
    Ok(Page {
        id: PageId(id),
        page_number: row.get(1)?,
        extracted_text: row.get(2)?,
        edited_text: row.get(3)?,
        photo_url: row.get(4)?,
    })
}

/// Column indices must match the SELECT in `get_chapters`.
fn row_to_chapter(row: &rusqlite::Row<'_>) -> rusqlite::Result<Chapter> {
    let id_str: String = row.get(0)?;
    let project_id: String = row.get(1)?;
    let chapter_type_str: String = row.get(5)?;

    let uuid = uuid::Uuid::parse_str(&id_str).map_err(|e| conversion_error(0, e))?;
    let chapter_type = ChapterType::from_str_opt(&chapter_type_str).ok_or_else(|| {
        conversion_error(
            5,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown chapter type {chapter_type_str:?}"),
            ),
        )
    })?;

    Ok(Chapter {
        id: ChapterId(uuid),
        project_id: ProjectId(project_id),
        title: row.get(2)?,
        start_page_number: row.get(3)?,
        end_page_number: row.get(4)?,
        chapter_type,
        description: row.get(6)?,
        order: row.get(7)?,
    })
}
