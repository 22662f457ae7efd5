//! In-memory students backend implementing the REST contract the client
//! talks to. Ids are sequential integers assigned on create.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub course: String,
}

#[derive(Deserialize)]
pub struct StudentBody {
    pub name: String,
    pub email: String,
    pub course: String,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    students: BTreeMap<u64, Student>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_students(State(db): State<Db>) -> Json<Vec<Student>> {
    let store = db.read().await;
    Json(store.students.values().cloned().collect())
}

async fn create_student(State(db): State<Db>, Json(input): Json<StudentBody>) -> Json<Student> {
    let mut store = db.write().await;
    store.next_id += 1;
    let student = Student {
        id: store.next_id,
        name: input.name,
        email: input.email,
        course: input.course,
    };
    store.students.insert(student.id, student.clone());
    info!(id = student.id, "student created");
    Json(student)
}

async fn get_student(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Student>, StatusCode> {
    let store = db.read().await;
    store.students.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<StudentBody>,
) -> Result<Json<Student>, StatusCode> {
    let mut store = db.write().await;
    let student = store.students.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    student.name = input.name;
    student.email = input.email;
    student.course = input.course;
    info!(id, "student updated");
    Ok(Json(student.clone()))
}

async fn delete_student(State(db): State<Db>, Path(id): Path<u64>) -> Result<String, StatusCode> {
    let mut store = db.write().await;
    store.students.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id, "student deleted");
    Ok(format!("Student deleted with ID: {id}"))
}
